//! Tunable parameters of a single run.

use aesop_error::{AesopResult, OrchestrationError, OrchestrationErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default turn cap.
pub const DEFAULT_MAX_TURNS: usize = 15;
/// Default end-of-work token.
pub const DEFAULT_TERMINATION_MARKER: &str = "TERMINATE";
/// Default minimum characters for a turn to count as prose.
pub const DEFAULT_MIN_ARTIFACT_LENGTH: usize = 200;
/// Default minimum share of punctuation among non-whitespace characters.
pub const DEFAULT_MIN_PUNCTUATION_DENSITY: f64 = 0.002;
/// Default word count below which an artifact gets an advisory.
pub const DEFAULT_TARGET_WORD_COUNT: usize = 1500;

/// Parameters of one orchestration run.
///
/// Every field has a default so partial TOML tables deserialize.
///
/// # Examples
///
/// ```
/// use aesop_core::RunConfig;
///
/// let config = RunConfig::builder()
///     .max_turns(5)
///     .termination_marker("DONE")
///     .build()
///     .unwrap();
/// assert_eq!(*config.max_turns(), 5);
/// assert_eq!(config.termination_marker(), "DONE");
/// assert_eq!(*config.min_artifact_length(), 200);
/// config.validate().unwrap();
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[serde(default)]
#[builder(default)]
pub struct RunConfig {
    /// Hard cap on turns. Must be at least 1.
    max_turns: usize,
    /// Token that signals the work is finished.
    #[builder(setter(into))]
    termination_marker: String,
    /// Minimum characters for a turn to be taken as prose.
    min_artifact_length: usize,
    /// Words of which at least one must appear in prose.
    #[builder(setter(into))]
    required_keywords: Vec<String>,
    /// Minimum punctuation density for prose.
    min_punctuation_density: f64,
    /// Word count below which the artifact carries an advisory.
    target_word_count: Option<usize>,
    /// Wall-clock limit for the whole run.
    timeout_secs: Option<u64>,
    /// Turn prefixes treated as coordination chatter.
    #[builder(setter(into))]
    chatter_prefixes: Vec<String>,
    /// Fragments whose presence marks a turn as coordination chatter.
    #[builder(setter(into))]
    chatter_sentinels: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            termination_marker: DEFAULT_TERMINATION_MARKER.to_string(),
            min_artifact_length: DEFAULT_MIN_ARTIFACT_LENGTH,
            required_keywords: ["once", "story", "tale", "adventure"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_punctuation_density: DEFAULT_MIN_PUNCTUATION_DENSITY,
            target_word_count: Some(DEFAULT_TARGET_WORD_COUNT),
            timeout_secs: None,
            chatter_prefixes: vec!["Select an agent".to_string()],
            chatter_sentinels: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Creates a new run config builder.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Check the values a run cannot start without.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRunConfig` for a zero turn cap, a blank marker, a
    /// negative or non-finite density, or a zero timeout.
    #[track_caller]
    pub fn validate(&self) -> AesopResult<()> {
        let invalid = |msg: &str| -> AesopResult<()> {
            Err(OrchestrationError::new(OrchestrationErrorKind::InvalidRunConfig(
                msg.to_string(),
            ))
            .into())
        };

        if self.max_turns == 0 {
            return invalid("max_turns must be at least 1");
        }
        if self.termination_marker.trim().is_empty() {
            return invalid("termination_marker must not be empty");
        }
        if !self.min_punctuation_density.is_finite() || self.min_punctuation_density < 0.0 {
            return invalid("min_punctuation_density must be a non-negative number");
        }
        if self.timeout_secs == Some(0) {
            return invalid("timeout_secs must be positive when set");
        }
        Ok(())
    }

    /// Run timeout as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Same config with another turn cap.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Same config with another run time budget.
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
