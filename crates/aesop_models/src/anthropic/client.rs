use crate::http::send_json;
use crate::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use aesop_core::{GenerateRequest, GenerateResponse, Usage};
use aesop_error::{AesopResult, BuilderError, ModelsResult};
use aesop_interface::AesopDriver;
use reqwest::Client;
use tracing::{debug, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const PROVIDER: &str = "anthropic";

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-3-5-haiku-latest")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Anthropic client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Use a different server root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends a request to the Anthropic API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn generate_anthropic(
        &self,
        request: &AnthropicRequest,
    ) -> ModelsResult<AnthropicResponse> {
        debug!("Sending request to Anthropic API");
        let url = format!("{}/v1/messages", self.base_url);
        let builder = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request);
        let response: AnthropicResponse = send_json(PROVIDER, builder).await?;
        debug!(response_id = %response.id(), "Received response from Anthropic");
        Ok(response)
    }

    /// Converts an Aesop request to an Anthropic API request.
    ///
    /// System instructions travel in the `system` parameter, not as a message.
    fn convert_request(&self, request: &GenerateRequest) -> AesopResult<AnthropicRequest> {
        let message = AnthropicMessage::builder()
            .role("user")
            .content(request.prompt().as_str())
            .build()
            .map_err(|e| BuilderError::provider_request(PROVIDER, e))?;

        let system = Some(request.system().clone()).filter(|s| !s.is_empty());

        AnthropicRequest::builder()
            .model(request.model().as_deref().unwrap_or(&self.model))
            .max_tokens(request.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS))
            .system(system)
            .messages(vec![message])
            .temperature(*request.temperature())
            .build()
            .map_err(|e| BuilderError::provider_request(PROVIDER, e).into())
    }

    fn convert_response(response: &AnthropicResponse) -> GenerateResponse {
        let usage = response.usage().as_ref().map(|u| Usage {
            input_tokens: *u.input_tokens(),
            output_tokens: *u.output_tokens(),
        });
        GenerateResponse::new(response.text(), usage)
    }
}

#[async_trait::async_trait]
impl AesopDriver for AnthropicClient {
    #[instrument(skip(self, request), fields(provider = PROVIDER, model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> AesopResult<GenerateResponse> {
        let anthropic_request = self.convert_request(request)?;
        let anthropic_response = self.generate_anthropic(&anthropic_request).await?;
        Ok(Self::convert_response(&anthropic_response))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
