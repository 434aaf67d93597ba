//! Model provider errors.

/// Provider-level error conditions.
///
/// Every variant names the provider so a failure surfaced to the caller
/// identifies which backend rejected the call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[display("{} request failed: {}", provider, message)]
    Http {
        /// Provider name
        provider: String,
        /// Underlying transport message
        message: String,
    },

    /// The provider answered with a non-success status.
    #[display("{} API error {}: {}", provider, status, message)]
    Api {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The provider answered 429.
    #[display("{} rate limit exceeded: {}", provider, message)]
    RateLimited {
        /// Provider name
        provider: String,
        /// Response body
        message: String,
    },

    /// The response body could not be decoded.
    #[display("Failed to parse {} response: {}", provider, message)]
    Parse {
        /// Provider name
        provider: String,
        /// Decoder message
        message: String,
    },
}

impl ModelsErrorKind {
    /// HTTP status attached to this error, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelsErrorKind::Api { status, .. } => Some(*status),
            ModelsErrorKind::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use aesop_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::Api {
///     provider: "openai".to_string(),
///     status: 401,
///     message: "invalid api key".to_string(),
/// });
/// assert_eq!(err.kind.status(), Some(401));
/// assert!(err.to_string().contains("invalid api key"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
