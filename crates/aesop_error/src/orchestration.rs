//! Orchestration error types.

/// Broad class of a failure, used by callers to branch on outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorCategory {
    /// Invalid setup detected before any turn ran. Never retried.
    #[display("configuration")]
    Configuration,
    /// The LLM capability failed or did not answer in time.
    #[display("transport")]
    Transport,
    /// The caller abandoned the run.
    #[display("cancelled")]
    Cancelled,
}

/// Specific error conditions for an orchestration run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OrchestrationErrorKind {
    /// The roster has no roles
    #[display("Role roster cannot be empty")]
    EmptyRoster,
    /// Two roles share a name
    #[display("Role '{}' is declared more than once", _0)]
    DuplicateRole(String),
    /// A role name did not match any roster entry
    #[display("Unknown role '{}'", _0)]
    UnknownRole(String),
    /// Run configuration failed validation
    #[display("Invalid run configuration: {}", _0)]
    InvalidRunConfig(String),
    /// Credentials for the LLM provider are missing
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),
    /// Caller input was rejected before the run started
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
    /// `run` was called on an orchestrator that already left the idle state
    #[display("Orchestrator is {}, only an idle orchestrator can run", _0)]
    NotIdle(String),
    /// The transcript reached its hard cap
    #[display("Transcript is full ({} turns)", _0)]
    TranscriptFull(usize),
    /// The LLM returned nothing usable for a role
    #[display("Model {} returned an empty response", _0)]
    EmptyResponse(String),
    /// The run exceeded its wall-clock budget
    #[display("Run exceeded its {}s time budget", _0)]
    Timeout(u64),
    /// The run was cancelled between turns
    #[display("Run cancelled before turn {}", _0)]
    Cancelled(usize),
}

impl OrchestrationErrorKind {
    /// Classify this condition.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OrchestrationErrorKind::EmptyResponse(_) | OrchestrationErrorKind::Timeout(_) => {
                ErrorCategory::Transport
            }
            OrchestrationErrorKind::Cancelled(_) => ErrorCategory::Cancelled,
            _ => ErrorCategory::Configuration,
        }
    }
}

/// Error type for orchestration operations.
///
/// # Examples
///
/// ```
/// use aesop_error::{ErrorCategory, OrchestrationError, OrchestrationErrorKind};
///
/// let err = OrchestrationError::new(OrchestrationErrorKind::EmptyRoster);
/// assert!(format!("{}", err).contains("empty"));
/// assert_eq!(err.kind.category(), ErrorCategory::Configuration);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Orchestration Error: {} at line {} in {}", kind, line, file)]
pub struct OrchestrationError {
    /// The specific error condition
    pub kind: OrchestrationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl OrchestrationError {
    /// Create a new OrchestrationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: OrchestrationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
