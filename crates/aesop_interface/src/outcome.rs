//! Run lifecycle and result types.

use crate::Artifact;
use aesop_core::Transcript;
use aesop_error::{AesopError, ErrorCategory};
use serde::{Deserialize, Serialize};

/// Lifecycle of an orchestrator.
///
/// `Idle` moves to `Running` exactly once; `Running` ends in either
/// `Completed` or `Failed`, both terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Constructed, not yet run
    Idle,
    /// Turn loop in progress
    Running,
    /// Finished and extracted an artifact
    Completed,
    /// Stopped by a transport failure, timeout or cancellation
    Failed,
}

impl RunState {
    /// True for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }
}

/// Which completion rule ended the run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// The latest turn contained the termination marker.
    Marker,
    /// The transcript reached the turn cap.
    TurnCap,
}

/// Tagged result of a run.
///
/// Both variants carry the transcript so callers can inspect the turns that
/// were produced before a failure.
#[derive(Debug)]
pub enum RunOutcome {
    /// The run finished and an artifact was extracted.
    Completed {
        /// Extracted artifact
        artifact: Artifact,
        /// Full transcript
        transcript: Transcript,
        /// Rule that ended the run
        reason: CompletionReason,
    },
    /// The run stopped early.
    Failed {
        /// What went wrong
        error: AesopError,
        /// Turns produced before the failure
        transcript: Transcript,
    },
}

impl RunOutcome {
    /// True for `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    /// Transcript of the run, whatever its outcome.
    pub fn transcript(&self) -> &Transcript {
        match self {
            RunOutcome::Completed { transcript, .. } | RunOutcome::Failed { transcript, .. } => {
                transcript
            }
        }
    }

    /// Artifact, if the run completed.
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            RunOutcome::Completed { artifact, .. } => Some(artifact),
            RunOutcome::Failed { .. } => None,
        }
    }

    /// Error, if the run failed.
    pub fn error(&self) -> Option<&AesopError> {
        match self {
            RunOutcome::Completed { .. } => None,
            RunOutcome::Failed { error, .. } => Some(error),
        }
    }

    /// Failure category, if the run failed.
    pub fn category(&self) -> Option<ErrorCategory> {
        self.error().map(AesopError::category)
    }

    /// Terminal state this outcome corresponds to.
    pub fn state(&self) -> RunState {
        match self {
            RunOutcome::Completed { .. } => RunState::Completed,
            RunOutcome::Failed { .. } => RunState::Failed,
        }
    }
}
