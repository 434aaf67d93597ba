mod test_utils;

use aesop_core::{Role, Roster, Transcript};
use aesop_ensemble::{LlmGuidedSelector, RoundRobinSelector, TurnSelector};
use aesop_error::ErrorCategory;
use std::collections::HashMap;
use std::sync::Arc;
use test_utils::{MockDriver, MockResponse, story_roles};

fn roster() -> Roster {
    Roster::new(story_roles()).unwrap()
}

#[tokio::test]
async fn round_robin_starts_with_first_role() {
    let roster = roster();
    let transcript = Transcript::new(5);
    let role = RoundRobinSelector
        .select_next(&transcript, &roster, None)
        .await
        .unwrap();
    assert_eq!(role.name(), "Character_Developer");
}

#[tokio::test]
async fn round_robin_wraps_around() {
    let roster = roster();
    let transcript = Transcript::new(5);
    let last = roster.find("Climax_Creator");
    let role = RoundRobinSelector
        .select_next(&transcript, &roster, last)
        .await
        .unwrap();
    assert_eq!(role.name(), "Character_Developer");
}

#[tokio::test]
async fn round_robin_is_fair_over_whole_cycles() {
    let roster = roster();
    let transcript = Transcript::new(100);
    let k = 4;
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut last: Option<&Role> = None;
    for _ in 0..k * roster.len() {
        let role = RoundRobinSelector
            .select_next(&transcript, &roster, last)
            .await
            .unwrap();
        *counts.entry(role.name().clone()).or_default() += 1;
        last = Some(role);
    }
    assert_eq!(counts.len(), roster.len());
    assert!(counts.values().all(|&c| c == k), "{counts:?}");
}

#[test]
fn round_robin_rejects_foreign_role() {
    let roster = roster();
    let stranger = Role::new("Stranger", "?", "?");
    let err = RoundRobinSelector.next(&roster, Some(&stranger)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

fn guided(responses: Vec<MockResponse>) -> (Arc<MockDriver>, LlmGuidedSelector) {
    let driver = Arc::new(MockDriver::scripted(
        responses,
        MockResponse::text("no idea"),
    ));
    let selector = LlmGuidedSelector::new(driver.clone());
    (driver, selector)
}

#[tokio::test]
async fn guided_accepts_exact_name() {
    let roster = roster();
    let (driver, selector) = guided(vec![MockResponse::text("Story_Writer")]);
    let role = selector
        .select_next(&Transcript::new(5), &roster, None)
        .await
        .unwrap();
    assert_eq!(role.name(), "Story_Writer");
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn guided_accepts_case_insensitive_and_mentions() {
    let roster = roster();
    let (_driver, selector) = guided(vec![
        MockResponse::text("climax_creator"),
        MockResponse::text("I would pick Story_Writer, then Climax_Creator."),
    ]);
    let transcript = Transcript::new(5);
    let first = selector
        .select_next(&transcript, &roster, None)
        .await
        .unwrap();
    assert_eq!(first.name(), "Climax_Creator");
    let second = selector
        .select_next(&transcript, &roster, None)
        .await
        .unwrap();
    assert_eq!(second.name(), "Story_Writer");
}

#[tokio::test]
async fn guided_falls_back_to_round_robin_on_garbage() {
    let roster = roster();
    let (_driver, selector) = guided(vec![MockResponse::text("the narrator, obviously")]);
    let last = roster.find("Character_Developer");
    let role = selector
        .select_next(&Transcript::new(5), &roster, last)
        .await
        .unwrap();
    assert_eq!(role.name(), "Story_Writer");
}

#[tokio::test]
async fn guided_rejects_repeat_when_disallowed() {
    let roster = roster();
    let (_driver, selector) = guided(vec![
        MockResponse::text("Story_Writer"),
        MockResponse::text("Story_Writer"),
    ]);
    let last = roster.find("Story_Writer");

    let allowed = selector
        .select_next(&Transcript::new(5), &roster, last)
        .await
        .unwrap();
    assert_eq!(allowed.name(), "Story_Writer");

    let strict = selector.with_repeated_speaker(false);
    let role = strict
        .select_next(&Transcript::new(5), &roster, last)
        .await
        .unwrap();
    assert_eq!(role.name(), "Climax_Creator");
}

#[tokio::test]
async fn guided_propagates_transport_errors() {
    let roster = roster();
    let (_driver, selector) = guided(vec![MockResponse::transport_error("connection reset")]);
    let err = selector
        .select_next(&Transcript::new(5), &roster, None)
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn guided_prompt_lists_roles_and_history() {
    let roster = roster();
    let (driver, selector) = guided(vec![MockResponse::text("Story_Writer")]);
    let selector = selector.with_prompt("ROLES:\n{roles}\nHISTORY:\n{history}\nPICK:{participants}");
    let transcript = Transcript::from_pairs([("Character_Developer", "Meet Pip the fox.")]);

    let rendered = selector.render_prompt(&transcript, &roster);
    assert!(rendered.contains("Story_Writer: Writes the story"));
    assert!(rendered.contains("Character_Developer: Meet Pip the fox."));
    assert!(rendered.contains("PICK:[Character_Developer, Story_Writer, Climax_Creator]"));

    selector
        .select_next(&transcript, &roster, roster.find("Character_Developer"))
        .await
        .unwrap();
    assert_eq!(driver.systems(), vec![rendered]);
}

#[tokio::test]
async fn guided_falls_back_to_round_robin_on_blank_reply() {
    let roster = roster();
    let (driver, selector) = guided(vec![MockResponse::text("   ")]);
    let role = selector
        .select_next(&Transcript::new(5), &roster, None)
        .await
        .unwrap();
    assert_eq!(role.name(), "Character_Developer");
    assert_eq!(driver.call_count(), 1);
}
