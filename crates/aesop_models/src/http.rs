//! Shared request plumbing for JSON-over-HTTP providers.

use aesop_error::{ModelsError, ModelsErrorKind};

/// Map a non-success HTTP status to a provider error.
///
/// 429 becomes `RateLimited`; every other status becomes `Api`.
#[track_caller]
pub fn status_error(provider: &str, status: u16, body: impl Into<String>) -> ModelsError {
    let message = body.into();
    let kind = if status == 429 {
        ModelsErrorKind::RateLimited {
            provider: provider.to_string(),
            message,
        }
    } else {
        ModelsErrorKind::Api {
            provider: provider.to_string(),
            status,
            message,
        }
    };
    ModelsError::new(kind)
}

/// Send a prepared request and decode a JSON body.
#[cfg(any(feature = "openai", feature = "anthropic"))]
pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> aesop_error::ModelsResult<T> {
    use tracing::{debug, error};

    let response = request.send().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to send request");
        ModelsError::new(ModelsErrorKind::Http {
            provider: provider.to_string(),
            message: e.to_string(),
        })
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(provider, status = %status, body = %body, "Provider returned error");
        return Err(status_error(provider, status.as_u16(), body));
    }

    let body = response.text().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to read response body");
        ModelsError::new(ModelsErrorKind::Http {
            provider: provider.to_string(),
            message: e.to_string(),
        })
    })?;
    debug!(provider, bytes = body.len(), "Response received");

    serde_json::from_str(&body).map_err(|e| {
        error!(provider, error = %e, "Failed to parse response");
        ModelsError::new(ModelsErrorKind::Parse {
            provider: provider.to_string(),
            message: e.to_string(),
        })
    })
}
