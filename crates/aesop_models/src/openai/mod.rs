//! OpenAI chat completions provider.

mod client;
mod dto;

pub use client::OpenAIClient;
pub use dto::{
    ChatChoice, ChatMessage, ChatMessageBuilder, ChatRequest, ChatRequestBuilder, ChatResponse,
    ChatResponseMessage, ChatUsage,
};
