//! LLM provider integrations for Aesop.
//!
//! Each provider lives behind its own feature flag.
//!
//! # Available Providers
//!
//! - **OpenAI** (and OpenAI-compatible servers) - Enable with `openai` feature
//! - **Anthropic** (Claude) - Enable with `anthropic` feature
//!
//! # Example
//!
//! ```toml
//! [dependencies]
//! aesop_models = { version = "0.1", features = ["openai"] }
//! ```
//!
//! ```no_run
//! # #[cfg(feature = "openai")]
//! # {
//! use aesop_core::GenerationParams;
//! use aesop_interface::AesopDriver;
//! use aesop_models::OpenAIClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIClient::new("sk-...", "gpt-4o-mini");
//! let text = client
//!     .complete("You are a storyteller.", "Tell a tale.", &GenerationParams::default())
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;

pub use http::status_error;

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
mod anthropic;

#[cfg(feature = "openai")]
pub use openai::{
    ChatChoice, ChatMessage, ChatMessageBuilder, ChatRequest, ChatRequestBuilder, ChatResponse,
    ChatResponseMessage, ChatUsage, OpenAIClient,
};

#[cfg(feature = "anthropic")]
pub use anthropic::{
    AnthropicClient, AnthropicContent, AnthropicMessage, AnthropicMessageBuilder,
    AnthropicRequest, AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
