//! Append-only conversation record.

use aesop_error::{AesopResult, OrchestrationError, OrchestrationErrorKind};
use serde::{Deserialize, Serialize};

/// One contribution by one role.
///
/// Turns are immutable once appended. `index` is the zero-based position in
/// the transcript and is strictly increasing with no gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    index: usize,
    role: String,
    text: String,
}

impl Turn {
    /// Position of this turn within its transcript.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the role that produced this turn.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Raw generated text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered sequence of turns for a single run.
///
/// The transcript only grows. It refuses appends beyond its capacity so the
/// turn cap of a run can never be exceeded.
///
/// # Examples
///
/// ```
/// use aesop_core::Transcript;
///
/// let mut transcript = Transcript::new(2);
/// transcript.append("Character_Developer", "Meet Pip the fox.").unwrap();
/// transcript.append("Story_Writer", "Chapter 1").unwrap();
/// assert!(transcript.is_full());
/// assert!(transcript.append("Climax_Creator", "Boom").is_err());
/// assert_eq!(transcript.last().map(|t| t.role()), Some("Story_Writer"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTranscript")]
pub struct Transcript {
    turns: Vec<Turn>,
    capacity: usize,
}

/// Unchecked serialized form, validated on the way in.
#[derive(Deserialize)]
struct StoredTranscript {
    turns: Vec<Turn>,
    capacity: usize,
}

impl TryFrom<StoredTranscript> for Transcript {
    type Error = String;

    fn try_from(stored: StoredTranscript) -> Result<Self, Self::Error> {
        if stored.turns.len() > stored.capacity {
            return Err(format!(
                "transcript holds {} turns but its capacity is {}",
                stored.turns.len(),
                stored.capacity
            ));
        }
        if let Some((position, turn)) = stored
            .turns
            .iter()
            .enumerate()
            .find(|(position, turn)| turn.index != *position)
        {
            return Err(format!(
                "turn at position {position} is numbered {}",
                turn.index
            ));
        }
        Ok(Self {
            turns: stored.turns,
            capacity: stored.capacity,
        })
    }
}

impl Transcript {
    /// Create an empty transcript holding at most `capacity` turns.
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: Vec::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Build a transcript from `(role, text)` pairs with no capacity limit.
    pub fn from_pairs<I, R, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, T)>,
        R: Into<String>,
        T: Into<String>,
    {
        let turns = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (role, text))| Turn {
                index,
                role: role.into(),
                text: text.into(),
            })
            .collect();
        Self {
            turns,
            capacity: usize::MAX,
        }
    }

    /// Append a turn, returning a reference to it.
    ///
    /// # Errors
    ///
    /// Returns `TranscriptFull` when the capacity has been reached.
    #[track_caller]
    pub fn append(
        &mut self,
        role: impl Into<String>,
        text: impl Into<String>,
    ) -> AesopResult<&Turn> {
        if self.is_full() {
            return Err(
                OrchestrationError::new(OrchestrationErrorKind::TranscriptFull(self.capacity))
                    .into(),
            );
        }
        let index = self.turns.len();
        self.turns.push(Turn {
            index,
            role: role.into(),
            text: text.into(),
        });
        tracing::trace!(index, "Turn appended");
        Ok(&self.turns[index])
    }

    /// All turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns recorded.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turn has been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of turns.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no further turn may be appended.
    pub fn is_full(&self) -> bool {
        self.turns.len() >= self.capacity
    }

    /// Most recent turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Name of the role that spoke last.
    pub fn last_speaker(&self) -> Option<&str> {
        self.turns.last().map(Turn::role)
    }

    /// Iterate turns in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Render as `role: text` blocks separated by blank lines.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role, t.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
