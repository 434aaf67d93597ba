//! Recovering the finished artifact from a transcript.
//!
//! Turns mix coordination chatter, partial drafts and the real result. The
//! [`Extractor`] strips the termination marker, drops chatter, then scans the
//! remaining turns newest first for one that an [`ArtifactHeuristic`] accepts
//! as finished prose. If none qualifies it joins everything that is left.

use aesop_core::{RunConfig, Transcript};
use aesop_interface::{Advisory, Artifact, ArtifactSource};
use tracing::{debug, instrument};

/// Text returned when nothing usable was produced.
pub const EMPTY_ARTIFACT_SENTINEL: &str =
    "Unable to generate story. Please try again with a different title or genre.";

const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\''];

/// Decides whether a single turn looks like the finished artifact.
pub trait ArtifactHeuristic: Send + Sync {
    /// True when `text` (marker already removed) is acceptable as the result.
    fn qualifies(&self, text: &str, config: &RunConfig) -> bool;
}

/// Length, keyword and punctuation-density test for prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProseHeuristic;

impl ArtifactHeuristic for ProseHeuristic {
    fn qualifies(&self, text: &str, config: &RunConfig) -> bool {
        if text.chars().count() <= *config.min_artifact_length() {
            return false;
        }
        let lowered = text.to_lowercase();
        let keyword_hit = config.required_keywords().is_empty()
            || config
                .required_keywords()
                .iter()
                .any(|k| lowered.contains(&k.to_lowercase()));
        keyword_hit && punctuation_density(text) >= *config.min_punctuation_density()
    }
}

/// Share of punctuation among non-whitespace characters.
///
/// ```
/// use aesop_ensemble::punctuation_density;
///
/// assert_eq!(punctuation_density("ab."), 1.0 / 3.0);
/// assert_eq!(punctuation_density("   "), 0.0);
/// ```
pub fn punctuation_density(text: &str) -> f64 {
    let (visible, punctuation) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(visible, punctuation), c| {
            (visible + 1, punctuation + usize::from(PUNCTUATION.contains(&c)))
        });
    if visible == 0 {
        0.0
    } else {
        punctuation as f64 / visible as f64
    }
}

/// Remove every occurrence of `marker`, repeating until none remains.
///
/// Repetition matters when a removal joins two fragments into a new
/// occurrence.
///
/// ```
/// use aesop_ensemble::strip_marker;
///
/// assert_eq!(strip_marker("The end. DONE", "DONE"), "The end. ");
/// assert_eq!(strip_marker("DODONENE", "DONE"), "");
/// ```
pub fn strip_marker(text: &str, marker: &str) -> String {
    if marker.is_empty() {
        return text.to_string();
    }
    let mut current = text.to_string();
    while current.contains(marker) {
        current = current.replace(marker, "");
    }
    current
}

/// Denylist of coordination phrasing.
///
/// Prefixes and sentinels are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatterFilter {
    prefixes: Vec<String>,
    sentinels: Vec<String>,
}

impl ChatterFilter {
    /// Filter from explicit prefixes and sentinel fragments.
    pub fn new(prefixes: Vec<String>, sentinels: Vec<String>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(|p| p.to_lowercase()).collect(),
            sentinels: sentinels.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Filter configured by a run.
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            config.chatter_prefixes().clone(),
            config.chatter_sentinels().clone(),
        )
    }

    /// True when `text` is coordination noise rather than content.
    pub fn is_chatter(&self, text: &str) -> bool {
        let lowered = text.trim_start().to_lowercase();
        self.prefixes
            .iter()
            .any(|p| !p.is_empty() && lowered.starts_with(p.as_str()))
            || self
                .sentinels
                .iter()
                .any(|s| !s.is_empty() && lowered.contains(s.as_str()))
    }
}

/// Ranked-heuristic artifact extraction.
///
/// Extraction is a pure function of the transcript and config, so running it
/// twice gives the same artifact.
pub struct Extractor {
    heuristic: Box<dyn ArtifactHeuristic>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Box::new(ProseHeuristic))
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor").finish_non_exhaustive()
    }
}

impl Extractor {
    /// Extractor using a custom heuristic.
    pub fn new(heuristic: Box<dyn ArtifactHeuristic>) -> Self {
        Self { heuristic }
    }

    /// Recover the artifact from a finished transcript.
    #[instrument(skip_all, fields(turns = transcript.len()))]
    pub fn extract(&self, transcript: &Transcript, config: &RunConfig) -> Artifact {
        let marker = config.termination_marker();
        let chatter = ChatterFilter::from_config(config);

        let candidates: Vec<(usize, &str, String)> = transcript
            .iter()
            .map(|turn| {
                let cleaned = strip_marker(turn.text(), marker).trim().to_string();
                (turn.index(), turn.role(), cleaned)
            })
            .filter(|(_, _, text)| !text.is_empty() && !chatter.is_chatter(text))
            .collect();

        if candidates.is_empty() {
            debug!("No content left after filtering");
            return Artifact::new(EMPTY_ARTIFACT_SENTINEL, ArtifactSource::Empty, None);
        }

        let (text, source) = match candidates
            .iter()
            .rev()
            .find(|(_, _, text)| self.heuristic.qualifies(text, config))
        {
            Some((index, role, text)) => {
                debug!(index, role, "Turn qualifies as artifact");
                (
                    text.clone(),
                    ArtifactSource::Turn {
                        index: *index,
                        role: role.to_string(),
                    },
                )
            }
            None => {
                debug!(
                    parts = candidates.len(),
                    "No single turn qualifies, joining turns"
                );
                let joined = candidates
                    .iter()
                    .map(|(_, _, text)| text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                (joined, ArtifactSource::Composite)
            }
        };

        let text = strip_marker(&text, marker).trim().to_string();
        let advisory = advisory_for(&text, config);
        Artifact::new(text, source, advisory)
    }
}

fn advisory_for(text: &str, config: &RunConfig) -> Option<Advisory> {
    let target = (*config.target_word_count())?;
    let words = text.split_whitespace().count();
    (words < target).then_some(Advisory::BelowTarget { words, target })
}
