use aesop_core::{Role, Roster};
use aesop_error::{ErrorCategory, OrchestrationErrorKind};

fn trio() -> Vec<Role> {
    vec![
        Role::new("Character_Developer", "Creates characters", "Develop characters."),
        Role::new("Story_Writer", "Writes chapters", "Write the story."),
        Role::new("Climax_Creator", "Writes the ending", "Finish the story."),
    ]
}

#[test]
fn roster_keeps_declaration_order() {
    let roster = Roster::new(trio()).unwrap();
    assert_eq!(roster.len(), 3);
    assert_eq!(
        roster.names(),
        vec!["Character_Developer", "Story_Writer", "Climax_Creator"]
    );
    assert_eq!(roster.position("Climax_Creator"), Some(2));
    assert_eq!(roster.get(1).map(|r| r.name().as_str()), Some("Story_Writer"));
}

#[test]
fn empty_roster_is_rejected() {
    let err = Roster::new(Vec::new()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(err.to_string().contains("cannot be empty"), "{err}");
}

#[test]
fn duplicate_names_are_rejected() {
    let mut roles = trio();
    roles.push(Role::new("Story_Writer", "again", "again"));
    let err = Roster::new(roles).unwrap_err();
    match err.kind() {
        aesop_error::AesopErrorKind::Orchestration(e) => {
            assert_eq!(e.kind, OrchestrationErrorKind::DuplicateRole("Story_Writer".into()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn lookup_ignoring_case() {
    let roster = Roster::new(trio()).unwrap();
    assert!(roster.find("story_writer").is_none());
    let found = roster.find_ignore_case("story_writer").unwrap();
    assert_eq!(found.name(), "Story_Writer");
}

#[test]
fn role_builder_and_toml() {
    let role = Role::builder()
        .name("Narrator")
        .capability("Narrates")
        .instructions("Narrate.")
        .build()
        .unwrap();
    assert_eq!(role.capability(), "Narrates");

    let parsed: Role = toml::from_str(
        r#"
name = "Narrator"
description = "Narrates"
system_message = "Narrate."
"#,
    )
    .unwrap();
    assert_eq!(parsed, role);
}
