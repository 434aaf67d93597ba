//! The extracted result of a run.

use serde::{Deserialize, Serialize};

/// Where an artifact's text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactSource {
    /// A single turn qualified as finished prose.
    Turn {
        /// Transcript index of the turn
        index: usize,
        /// Role that produced it
        role: String,
    },
    /// No single turn qualified; all non-chatter turns were joined.
    Composite,
    /// Nothing remained after filtering.
    Empty,
}

/// Soft warning attached to a successful artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The artifact is shorter than the configured target.
    #[display(
        "[Note: this story is {} words long, short of the {}-word target.]",
        words,
        target
    )]
    BelowTarget {
        /// Words in the artifact
        words: usize,
        /// Configured target
        target: usize,
    },
}

/// Final text recovered from a transcript.
///
/// # Examples
///
/// ```
/// use aesop_interface::{Advisory, Artifact, ArtifactSource};
///
/// let artifact = Artifact::new(
///     "Once upon a time.",
///     ArtifactSource::Composite,
///     Some(Advisory::BelowTarget { words: 4, target: 1500 }),
/// );
/// assert!(artifact.render().starts_with("Once upon a time.\n\n[Note:"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Artifact {
    /// Trimmed artifact text, marker removed.
    text: String,
    /// How the text was chosen.
    source: ArtifactSource,
    /// Soft warning, if any.
    advisory: Option<Advisory>,
}

impl Artifact {
    /// Create an artifact.
    pub fn new(
        text: impl Into<String>,
        source: ArtifactSource,
        advisory: Option<Advisory>,
    ) -> Self {
        Self {
            text: text.into(),
            source,
            advisory,
        }
    }

    /// True when the extractor found nothing to return.
    pub fn is_empty(&self) -> bool {
        self.source == ArtifactSource::Empty
    }

    /// Text with any advisory appended inline.
    pub fn render(&self) -> String {
        match &self.advisory {
            Some(advisory) => format!("{}\n\n{}", self.text, advisory),
            None => self.text.clone(),
        }
    }
}
