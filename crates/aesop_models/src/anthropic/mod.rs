//! Anthropic Messages API provider.

mod client;
mod dto;

pub use client::AnthropicClient;
pub use dto::{
    AnthropicContent, AnthropicMessage, AnthropicMessageBuilder, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
