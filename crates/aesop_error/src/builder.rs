//! Failures assembling typed values from their builders.

/// What could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// Generation parameters from model settings
    #[display("Could not assemble generation parameters: {}", _0)]
    Params(String),

    /// Provider wire request
    #[display("Could not assemble {} request: {}", provider, message)]
    ProviderRequest {
        /// Provider name
        provider: String,
        /// Builder message
        message: String,
    },
}

/// Builder error with location tracking.
///
/// ```
/// use aesop_error::{AesopError, BuilderError, BuilderErrorKind, ErrorCategory};
///
/// let err: AesopError = BuilderError::provider_request("openai", "`model` must be initialized").into();
/// assert_eq!(err.category(), ErrorCategory::Configuration);
/// assert_eq!(
///     err.summary(),
///     "Could not assemble openai request: `model` must be initialized"
/// );
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A provider DTO builder failed.
    #[track_caller]
    pub fn provider_request(provider: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::new(BuilderErrorKind::ProviderRequest {
            provider: provider.into(),
            message: err.to_string(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
