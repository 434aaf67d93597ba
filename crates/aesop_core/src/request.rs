//! Requests to and responses from a language model.

use serde::{Deserialize, Serialize};

/// Model settings passed through to the provider unchanged.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(default)]
#[builder(default)]
pub struct GenerationParams {
    /// Model override; the driver's own model when absent.
    #[builder(setter(into, strip_option))]
    model: Option<String>,
    /// Sampling temperature.
    temperature: Option<f32>,
    /// Output token limit.
    max_tokens: Option<u32>,
}

impl GenerationParams {
    /// Creates a new params builder.
    pub fn builder() -> GenerationParamsBuilder {
        GenerationParamsBuilder::default()
    }
}

/// A single generation request: system instructions plus a user prompt.
///
/// # Examples
///
/// ```
/// use aesop_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .system("You are a storyteller.")
///     .prompt("Tell me about a brave mouse.")
///     .max_tokens(Some(512))
///     .build()
///     .unwrap();
/// assert_eq!(request.prompt(), "Tell me about a brave mouse.");
/// assert_eq!(*request.max_tokens(), Some(512));
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// System instructions for the model.
    #[builder(setter(into))]
    system: String,
    /// Prompt text.
    #[builder(setter(into))]
    prompt: String,
    /// Model override.
    model: Option<String>,
    /// Sampling temperature.
    temperature: Option<f32>,
    /// Output token limit.
    max_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Request carrying the given instructions, prompt and params.
    pub fn with_params(
        system: impl Into<String>,
        prompt: impl Into<String>,
        params: &GenerationParams,
    ) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            model: params.model().clone(),
            temperature: *params.temperature(),
            max_tokens: *params.max_tokens(),
        }
    }
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens consumed.
    pub input_tokens: u64,
    /// Completion tokens produced.
    pub output_tokens: u64,
}

/// Text produced by a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerateResponse {
    /// Generated text.
    text: String,
    /// Token accounting, when the provider reports it.
    usage: Option<Usage>,
}

impl GenerateResponse {
    /// Response with text and optional usage.
    pub fn new(text: impl Into<String>, usage: Option<Usage>) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}
