//! Trait definitions for LLM backends.

use aesop_core::{GenerateRequest, GenerateResponse, GenerationParams};
use aesop_error::{AesopResult, OrchestrationError, OrchestrationErrorKind};
use async_trait::async_trait;

/// Core trait that all LLM backends must implement.
///
/// The orchestrator treats a driver purely as a request/response boundary.
/// Drivers are shared between the orchestrator and an LLM-guided selector,
/// so implementations must be `Send + Sync` and hold no per-run state.
#[async_trait]
pub trait AesopDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> AesopResult<GenerateResponse>;

    /// Provider name (e.g., "anthropic", "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;

    /// Complete a conversation: system instructions plus context in, text out.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from [`generate`](Self::generate) and
    /// returns `EmptyResponse` when the model produced only whitespace.
    async fn complete(
        &self,
        system: &str,
        context: &str,
        params: &GenerationParams,
    ) -> AesopResult<String> {
        let request = GenerateRequest::with_params(system, context, params);
        let response = self.generate(&request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            tracing::warn!(
                provider = self.provider_name(),
                model = self.model_name(),
                "Model returned an empty response"
            );
            return Err(OrchestrationError::new(OrchestrationErrorKind::EmptyResponse(
                self.model_name().to_string(),
            ))
            .into());
        }
        tracing::debug!(
            provider = self.provider_name(),
            model = self.model_name(),
            chars = text.len(),
            "Completion received"
        );
        Ok(text.clone())
    }
}
