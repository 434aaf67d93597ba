//! Provider selection for configured model settings.

use aesop_ensemble::{ModelSettings, Provider};
use aesop_error::{AesopResult, OrchestrationError, OrchestrationErrorKind};
use aesop_interface::AesopDriver;
use std::sync::Arc;
use tracing::debug;

/// Build the driver for `model`'s provider.
///
/// A configured `base_url` points the client at another server, such as an
/// OpenAI-compatible local endpoint.
///
/// # Errors
///
/// Returns `InvalidInput` when support for the provider was not compiled in.
pub fn build_driver(model: &ModelSettings, api_key: String) -> AesopResult<Arc<dyn AesopDriver>> {
    debug!(provider = %model.provider(), model = %model.name(), "Building driver");
    match model.provider() {
        #[cfg(feature = "openai")]
        Provider::OpenAI => {
            let mut client = aesop_models::OpenAIClient::new(api_key, model.name().clone());
            if let Some(url) = model.base_url() {
                client = client.with_base_url(url.clone());
            }
            Ok(Arc::new(client))
        }
        #[cfg(feature = "anthropic")]
        Provider::Anthropic => {
            let mut client = aesop_models::AnthropicClient::new(api_key, model.name().clone());
            if let Some(url) = model.base_url() {
                client = client.with_base_url(url.clone());
            }
            Ok(Arc::new(client))
        }
        #[allow(unreachable_patterns)]
        other => {
            let _ = api_key;
            Err(OrchestrationError::new(OrchestrationErrorKind::InvalidInput(format!(
                "Provider '{other}' is not enabled in this build"
            )))
            .into())
        }
    }
}
