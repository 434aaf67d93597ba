//! Shared helpers for CLI tests.

use aesop::{AesopDriver, AesopResult, GenerateRequest, GenerateResponse, ModelsError, ModelsErrorKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued replies in order; an empty queue fails like a dropped connection.
#[derive(Debug)]
pub struct ReplayDriver {
    replies: Mutex<VecDeque<String>>,
}

impl ReplayDriver {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl AesopDriver for ReplayDriver {
    async fn generate(&self, _req: &GenerateRequest) -> AesopResult<GenerateResponse> {
        match self.replies.lock().unwrap().pop_front() {
            Some(text) => Ok(GenerateResponse::new(text, None)),
            None => Err(ModelsError::new(ModelsErrorKind::Http {
                provider: "replay".to_string(),
                message: "connection reset".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "replay"
    }

    fn model_name(&self) -> &str {
        "replay-model"
    }
}

/// A story long enough, and punctuated enough, to pass the prose checks.
pub fn long_story() -> String {
    "Once upon a time, in a quiet valley, a small fox named Pip found a lantern. "
        .repeat(20)
}
