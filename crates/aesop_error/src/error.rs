//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, ErrorCategory, ModelsError, OrchestrationError};

/// The foundation error enum aggregating every leaf error in the workspace.
///
/// # Examples
///
/// ```
/// use aesop_error::{AesopError, ConfigError};
///
/// let err: AesopError = ConfigError::new("unreadable file").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AesopErrorKind {
    /// Configuration error
    Config(ConfigError),
    /// Builder error
    Builder(BuilderError),
    /// Model provider error
    Models(ModelsError),
    /// Orchestration error
    Orchestration(OrchestrationError),
}

/// Aesop error with kind discrimination.
///
/// # Examples
///
/// ```
/// use aesop_error::{AesopResult, ErrorCategory, OrchestrationError, OrchestrationErrorKind};
///
/// fn might_fail() -> AesopResult<()> {
///     Err(OrchestrationError::new(OrchestrationErrorKind::EmptyRoster))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert_eq!(err.category(), ErrorCategory::Configuration);
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Aesop Error: {}", _0)]
pub struct AesopError(Box<AesopErrorKind>);

impl AesopError {
    /// Create a new error from a kind.
    pub fn new(kind: AesopErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AesopErrorKind {
        &self.0
    }

    /// Classify this error as a configuration, transport or cancellation failure.
    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            AesopErrorKind::Config(_) | AesopErrorKind::Builder(_) => ErrorCategory::Configuration,
            AesopErrorKind::Models(_) => ErrorCategory::Transport,
            AesopErrorKind::Orchestration(e) => e.kind.category(),
        }
    }

    /// Message of the underlying condition, without source location.
    ///
    /// ```
    /// use aesop_error::{AesopError, OrchestrationError, OrchestrationErrorKind};
    ///
    /// let err: AesopError = OrchestrationError::new(OrchestrationErrorKind::Timeout(30)).into();
    /// assert_eq!(err.summary(), "Run exceeded its 30s time budget");
    /// ```
    pub fn summary(&self) -> String {
        match self.kind() {
            AesopErrorKind::Config(e) => e.message.clone(),
            AesopErrorKind::Builder(e) => e.kind().to_string(),
            AesopErrorKind::Models(e) => e.kind.to_string(),
            AesopErrorKind::Orchestration(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to AesopErrorKind
impl<T> From<T> for AesopError
where
    T: Into<AesopErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Aesop operations.
pub type AesopResult<T> = std::result::Result<T, AesopError>;
