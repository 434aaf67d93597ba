use crate::http::send_json;
use crate::{ChatMessage, ChatRequest, ChatResponse};
use aesop_core::{GenerateRequest, GenerateResponse, Usage};
use aesop_error::{AesopResult, BuilderError, ModelsResult};
use aesop_interface::AesopDriver;
use reqwest::Client;
use tracing::{debug, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com";
const PROVIDER: &str = "openai";

/// OpenAI chat completions client.
///
/// Works against any server exposing the `/v1/chat/completions` route;
/// point it elsewhere with [`with_base_url`](Self::with_base_url).
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Use a different server root, such as a local OpenAI-compatible proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Server root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a chat completion request.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn chat(&self, request: &ChatRequest) -> ModelsResult<ChatResponse> {
        debug!("Sending request to OpenAI API");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let builder = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request);
        let response: ChatResponse = send_json(PROVIDER, builder).await?;
        debug!(response_id = %response.id(), "Received response from OpenAI");
        Ok(response)
    }

    /// Converts an Aesop request to a chat completion request.
    fn convert_request(&self, request: &GenerateRequest) -> AesopResult<ChatRequest> {
        let mut messages = Vec::with_capacity(2);
        if !request.system().is_empty() {
            messages.push(Self::message("system", request.system())?);
        }
        messages.push(Self::message("user", request.prompt())?);

        ChatRequest::builder()
            .model(request.model().as_deref().unwrap_or(&self.model))
            .messages(messages)
            .temperature(*request.temperature())
            .max_tokens(*request.max_tokens())
            .build()
            .map_err(|e| BuilderError::provider_request(PROVIDER, e).into())
    }

    fn message(role: &str, content: &str) -> AesopResult<ChatMessage> {
        ChatMessage::builder()
            .role(role)
            .content(content)
            .build()
            .map_err(|e| BuilderError::provider_request(PROVIDER, e).into())
    }

    fn convert_response(response: &ChatResponse) -> GenerateResponse {
        let usage = response.usage().as_ref().map(|u| Usage {
            input_tokens: *u.prompt_tokens(),
            output_tokens: *u.completion_tokens(),
        });
        GenerateResponse::new(response.first_text(), usage)
    }
}

#[async_trait::async_trait]
impl AesopDriver for OpenAIClient {
    #[instrument(skip(self, request), fields(provider = PROVIDER, model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> AesopResult<GenerateResponse> {
        let chat_request = self.convert_request(request)?;
        let chat_response = self.chat(&chat_request).await?;
        Ok(Self::convert_response(&chat_response))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
