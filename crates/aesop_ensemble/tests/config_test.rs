use aesop_ensemble::{AesopConfig, Provider, SelectorPolicy};
use aesop_error::{AesopErrorKind, ErrorCategory, OrchestrationErrorKind};
use std::io::Write;
use std::str::FromStr;

#[test]
fn bundled_defaults() {
    let config = AesopConfig::bundled().unwrap();
    assert_eq!(*config.model().provider(), Provider::OpenAI);
    assert_eq!(config.model().name(), "gpt-4o-mini");
    assert_eq!(*config.model().temperature(), 0.7);
    assert_eq!(*config.model().max_tokens(), 2000);
    assert_eq!(*config.run().max_turns(), 15);
    assert_eq!(config.run().termination_marker(), "TERMINATE");
    assert_eq!(*config.selector().policy(), SelectorPolicy::LlmGuided);
    assert!(*config.selector().allow_repeated_speaker());
    assert_eq!(config.story().genres().len(), 8);
    assert_eq!(config.story().default_title(), "A Magical Adventure");

    let names: Vec<_> = config.roles().iter().map(|r| r.name().as_str()).collect();
    assert_eq!(names, vec!["Character_Developer", "Story_Writer", "Climax_Creator"]);
    config.validate().unwrap();
}

#[test]
fn params_pass_model_settings_through() {
    let config = AesopConfig::bundled().unwrap();
    let params = config.model().params().unwrap();
    assert_eq!(params.model().as_deref(), Some("gpt-4o-mini"));
    assert_eq!(*params.temperature(), Some(0.7));
    assert_eq!(*params.max_tokens(), Some(2000));
}

#[test]
fn explicit_file_overrides_bundled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[model]
provider = "anthropic"
name = "claude-3-5-haiku-latest"

[run]
max_turns = 4
timeout_secs = 120

[selector]
policy = "round_robin"
"#
    )
    .unwrap();

    let config = AesopConfig::load_from(&path).unwrap();
    assert_eq!(*config.model().provider(), Provider::Anthropic);
    assert_eq!(config.model().name(), "claude-3-5-haiku-latest");
    assert_eq!(*config.model().max_tokens(), 2000);
    assert_eq!(*config.run().max_turns(), 4);
    assert_eq!(*config.run().timeout_secs(), Some(120));
    assert_eq!(config.run().termination_marker(), "TERMINATE");
    assert_eq!(*config.selector().policy(), SelectorPolicy::RoundRobin);
    assert_eq!(config.roles().len(), 3);
}

#[test]
fn single_file_without_roles_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.toml");
    std::fs::write(&path, "[model]\nname = \"gpt-4o\"\n").unwrap();

    let config = AesopConfig::from_file(&path).unwrap();
    assert!(config.roles().is_empty());
    let err = config.validate().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AesopConfig::load_from(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err.kind(), AesopErrorKind::Config(_)));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[run]\nmax_turns = \"many\"\n").unwrap();
    assert!(AesopConfig::from_file(&path).is_err());
}

#[test]
fn validation_rejects_bad_model_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hot.toml");
    std::fs::write(&path, "[model]\ntemperature = 3.5\n").unwrap();
    let config = AesopConfig::load_from(&path).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn api_key_resolution() {
    let config = AesopConfig::bundled().unwrap();

    let explicit = config
        .resolve_api_key(Some("sk-explicit".into()), |_| Some("sk-env".into()))
        .unwrap();
    assert_eq!(explicit, "sk-explicit");

    let from_env = config
        .resolve_api_key(None, |var| {
            (var == "OPENAI_API_KEY").then(|| "sk-env".to_string())
        })
        .unwrap();
    assert_eq!(from_env, "sk-env");

    let err = config
        .resolve_api_key(Some("  ".into()), |_| None)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    match err.kind() {
        AesopErrorKind::Orchestration(e) => assert_eq!(
            e.kind,
            OrchestrationErrorKind::MissingCredentials("OPENAI_API_KEY is not set".into())
        ),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn provider_and_policy_names() {
    assert_eq!(Provider::from_str("Anthropic").unwrap(), Provider::Anthropic);
    assert_eq!(Provider::OpenAI.to_string(), "openai");
    assert_eq!(Provider::Anthropic.api_key_var(), "ANTHROPIC_API_KEY");
    assert_eq!(
        SelectorPolicy::from_str("llm_guided").unwrap(),
        SelectorPolicy::LlmGuided
    );
}

#[test]
fn list_keys_accept_comma_separated_environment_values() {
    let config = AesopConfig::load_with_vars([
        ("AESOP__RUN__REQUIRED_KEYWORDS", "dragon,castle"),
        ("AESOP__STORY__GENRES", "Fantasy,Pirate Tale"),
        ("AESOP__RUN__MAX_TURNS", "7"),
    ])
    .unwrap();

    assert_eq!(config.run().required_keywords(), &vec!["dragon", "castle"]);
    assert_eq!(config.story().genres(), &vec!["Fantasy", "Pirate Tale"]);
    assert_eq!(*config.run().max_turns(), 7);
    assert_eq!(config.run().termination_marker(), "TERMINATE");
}
