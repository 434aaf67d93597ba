mod test_utils;

use aesop_core::{RunConfig, Transcript};
use aesop_ensemble::{
    ArtifactHeuristic, ChatterFilter, EMPTY_ARTIFACT_SENTINEL, Extractor, ProseHeuristic,
};
use aesop_interface::{Advisory, ArtifactSource};
use test_utils::story_text;

#[test]
fn marker_is_removed_from_qualifying_turn() {
    let text = format!("Once upon a time... {} STORY_COMPLETE", "x".repeat(900));
    let transcript = Transcript::from_pairs([("Writer", text)]);
    let config = RunConfig::builder()
        .termination_marker("STORY_COMPLETE")
        .min_artifact_length(800)
        .build()
        .unwrap();

    let artifact = Extractor::default().extract(&transcript, &config);
    assert!(!artifact.text().contains("STORY_COMPLETE"));
    assert!(artifact.text().chars().count() >= 800);
    assert!(artifact.text().starts_with("Once upon a time..."));
    assert_eq!(
        artifact.source(),
        &ArtifactSource::Turn {
            index: 0,
            role: "Writer".into()
        }
    );
}

#[test]
fn chatter_is_excluded_and_story_returned_verbatim() {
    let story = story_text(1000);
    let transcript = Transcript::from_pairs([
        ("Selector", "Select an agent to perform the next task.".to_string()),
        ("Story_Writer", story.clone()),
    ]);

    let artifact = Extractor::default().extract(&transcript, &RunConfig::default());
    assert_eq!(artifact.text(), &story);
    assert!(!artifact.text().contains("Select an agent"));
    assert!(matches!(
        artifact.source(),
        ArtifactSource::Turn { index: 1, .. }
    ));
}

#[test]
fn most_recent_qualifying_turn_wins() {
    let early = format!("First draft. {}", story_text(300));
    let late = format!("Final draft. {}", story_text(300));
    let transcript = Transcript::from_pairs([
        ("Story_Writer", early),
        ("Climax_Creator", late.clone()),
        ("Character_Developer", "Looks good to me!".to_string()),
    ]);

    let artifact = Extractor::default().extract(&transcript, &RunConfig::default());
    assert_eq!(artifact.text(), &late);
}

#[test]
fn falls_back_to_concatenation() {
    let transcript = Transcript::from_pairs([("A", "short"), ("B", "also short")]);
    let artifact = Extractor::default().extract(&transcript, &RunConfig::default());
    assert_eq!(artifact.text(), "short\n\nalso short");
    assert_eq!(artifact.source(), &ArtifactSource::Composite);
}

#[test]
fn empty_after_filtering_returns_sentinel() {
    let transcript = Transcript::from_pairs([
        ("Selector", "Select an agent from [A, B]"),
        ("A", "   TERMINATE  "),
    ]);
    let artifact = Extractor::default().extract(&transcript, &RunConfig::default());
    assert_eq!(artifact.text(), EMPTY_ARTIFACT_SENTINEL);
    assert!(artifact.is_empty());
    assert!(artifact.advisory().is_none());

    let empty = Extractor::default().extract(&Transcript::new(3), &RunConfig::default());
    assert!(empty.is_empty());
}

#[test]
fn marker_never_survives() {
    let transcripts = [
        Transcript::from_pairs([("A", "TERMINATE"), ("B", "story TERMINATE TERMINATE")]),
        Transcript::from_pairs([("A", "TERMTERMINATEINATE tale")]),
        Transcript::from_pairs([("A", format!("{} TERMINATE", story_text(400)))]),
    ];
    for transcript in &transcripts {
        let artifact = Extractor::default().extract(transcript, &RunConfig::default());
        assert!(
            !artifact.render().contains("TERMINATE"),
            "marker leaked: {}",
            artifact.render()
        );
    }
}

#[test]
fn extraction_is_idempotent() {
    let transcript = Transcript::from_pairs([
        ("A", "Select an agent".to_string()),
        ("B", story_text(250)),
        ("C", "Nice work TERMINATE".to_string()),
    ]);
    let extractor = Extractor::default();
    let config = RunConfig::default();
    assert_eq!(
        extractor.extract(&transcript, &config),
        extractor.extract(&transcript, &config)
    );
}

#[test]
fn short_artifact_carries_advisory() {
    let story = story_text(400);
    let words = story.split_whitespace().count();
    let transcript = Transcript::from_pairs([("Story_Writer", story)]);

    let artifact = Extractor::default().extract(&transcript, &RunConfig::default());
    assert_eq!(
        artifact.advisory(),
        &Some(Advisory::BelowTarget {
            words,
            target: 1500
        })
    );
    assert!(artifact.render().contains("1500-word target"));

    let no_target = RunConfig::builder().target_word_count(None).build().unwrap();
    let artifact = Extractor::default().extract(&transcript, &no_target);
    assert!(artifact.advisory().is_none());
}

#[test]
fn chatter_filter_matches_prefixes_and_sentinels() {
    let filter = ChatterFilter::new(
        vec!["Select an agent".to_string()],
        vec!["[handoff]".to_string()],
    );
    assert!(filter.is_chatter("  select an AGENT to go next"));
    assert!(filter.is_chatter("Passing along [HANDOFF] now"));
    assert!(!filter.is_chatter("Once upon a time"));
}

#[test]
fn prose_heuristic_thresholds() {
    let config = RunConfig::default();
    let heuristic = ProseHeuristic;

    assert!(heuristic.qualifies(&story_text(100), &config));
    assert!(!heuristic.qualifies("Once upon a time.", &config));

    let no_keyword = "The fox ran home, and then it slept. ".repeat(20);
    assert!(!heuristic.qualifies(&no_keyword, &config));

    let no_punctuation = format!("once {}", "word ".repeat(300));
    assert!(!heuristic.qualifies(&no_punctuation, &config));
}

#[test]
fn custom_heuristic_is_honoured() {
    struct Longest;
    impl ArtifactHeuristic for Longest {
        fn qualifies(&self, text: &str, _config: &RunConfig) -> bool {
            text.len() > 5
        }
    }

    let transcript = Transcript::from_pairs([("A", "tiny"), ("B", "longer text")]);
    let artifact = Extractor::new(Box::new(Longest)).extract(&transcript, &RunConfig::default());
    assert_eq!(artifact.text(), "longer text");
}
