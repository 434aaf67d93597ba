//! Test utilities for Aesop ensemble tests.

#![allow(dead_code)]

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse};

use aesop_core::Role;

/// The three story personas with short instructions.
pub fn story_roles() -> Vec<Role> {
    vec![
        Role::new(
            "Character_Developer",
            "Creates characters",
            "You create characters.",
        ),
        Role::new("Story_Writer", "Writes the story", "You write the story."),
        Role::new("Climax_Creator", "Writes the climax", "You write the climax."),
    ]
}

/// A prose paragraph of roughly `words` words that passes the prose heuristic.
pub fn story_text(words: usize) -> String {
    let sentence = "Once upon a time, the little fox found a shining lantern in the wood.";
    let per_sentence = sentence.split_whitespace().count();
    let mut text = String::new();
    while text.split_whitespace().count() < words {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(sentence);
    }
    debug_assert!(text.split_whitespace().count() < words + per_sentence);
    text
}
