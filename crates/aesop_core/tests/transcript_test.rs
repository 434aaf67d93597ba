use aesop_core::Transcript;

#[test]
fn indices_are_contiguous() {
    let mut transcript = Transcript::new(10);
    for i in 0..4 {
        let turn = transcript.append("A", format!("turn {i}")).unwrap();
        assert_eq!(turn.index(), i);
    }
    let indices: Vec<_> = transcript.iter().map(|t| t.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn append_past_capacity_fails() {
    let mut transcript = Transcript::new(1);
    transcript.append("A", "one").unwrap();
    assert!(transcript.is_full());
    let err = transcript.append("A", "two").unwrap_err();
    assert!(err.to_string().contains("1"), "{err}");
    assert_eq!(transcript.len(), 1);
}

#[test]
fn render_joins_turns() {
    let transcript = Transcript::from_pairs([("A", "hello"), ("B", "world")]);
    assert_eq!(transcript.render(), "A: hello\n\nB: world");
    assert_eq!(transcript.last_speaker(), Some("B"));
}

#[test]
fn empty_transcript() {
    let transcript = Transcript::new(3);
    assert!(transcript.is_empty());
    assert!(transcript.last().is_none());
    assert_eq!(transcript.render(), "");
}

#[test]
fn serializes_to_json() {
    let transcript = Transcript::from_pairs([("A", "hello")]);
    let json = serde_json::to_value(&transcript).unwrap();
    assert_eq!(json["turns"][0]["role"], "A");
    assert_eq!(json["turns"][0]["index"], 0);
}

#[test]
fn deserializing_enforces_capacity_and_numbering() {
    let valid = r#"{"turns":[{"index":0,"role":"A","text":"hello"}],"capacity":2}"#;
    let transcript: Transcript = serde_json::from_str(valid).unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.capacity(), 2);

    let over_capacity = r#"{"turns":[
        {"index":0,"role":"A","text":"one"},
        {"index":1,"role":"B","text":"two"}
    ],"capacity":1}"#;
    let err = serde_json::from_str::<Transcript>(over_capacity).unwrap_err();
    assert!(err.to_string().contains("capacity is 1"));

    let gap = r#"{"turns":[{"index":3,"role":"A","text":"hello"}],"capacity":5}"#;
    assert!(serde_json::from_str::<Transcript>(gap).is_err());
}
