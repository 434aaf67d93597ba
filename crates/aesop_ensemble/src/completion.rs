//! Rules deciding when a run has finished.

use aesop_core::{RunConfig, Transcript};
use aesop_interface::CompletionReason;

/// Predicate evaluated after every appended turn.
pub trait CompletionRule: Send + Sync {
    /// Why the run is complete, or `None` to keep going.
    fn evaluate(&self, transcript: &Transcript, config: &RunConfig) -> Option<CompletionReason>;

    /// True when [`evaluate`](Self::evaluate) fires.
    fn is_complete(&self, transcript: &Transcript, config: &RunConfig) -> bool {
        self.evaluate(transcript, config).is_some()
    }
}

/// Fires when the latest turn contains the termination marker.
///
/// Matching is a case-sensitive substring test.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerRule;

impl CompletionRule for MarkerRule {
    fn evaluate(&self, transcript: &Transcript, config: &RunConfig) -> Option<CompletionReason> {
        let marker = config.termination_marker();
        if marker.is_empty() {
            return None;
        }
        transcript
            .last()
            .filter(|turn| turn.text().contains(marker.as_str()))
            .map(|_| CompletionReason::Marker)
    }
}

/// Fires once the transcript holds `max_turns` turns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnCountRule;

impl CompletionRule for TurnCountRule {
    fn evaluate(&self, transcript: &Transcript, config: &RunConfig) -> Option<CompletionReason> {
        (transcript.len() >= *config.max_turns()).then_some(CompletionReason::TurnCap)
    }
}

/// Logical OR over sub-rules; the first rule that fires supplies the reason.
pub struct AnyRule {
    rules: Vec<Box<dyn CompletionRule>>,
}

impl AnyRule {
    /// Combine rules.
    pub fn new(rules: Vec<Box<dyn CompletionRule>>) -> Self {
        Self { rules }
    }
}

impl Default for AnyRule {
    /// Marker OR turn cap.
    fn default() -> Self {
        Self::new(vec![Box::new(MarkerRule), Box::new(TurnCountRule)])
    }
}

impl std::fmt::Debug for AnyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyRule")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl CompletionRule for AnyRule {
    fn evaluate(&self, transcript: &Transcript, config: &RunConfig) -> Option<CompletionReason> {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(transcript, config))
    }
}
