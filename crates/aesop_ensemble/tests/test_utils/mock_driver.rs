//! Scripted driver for orchestration tests.

use aesop_core::{GenerateRequest, GenerateResponse};
use aesop_error::{AesopResult, ModelsError, ModelsErrorKind};
use aesop_interface::AesopDriver;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with text
    Text(String),
    /// Fail with a provider error
    Error(ModelsErrorKind),
    /// Sleep, then reply with text
    Delayed(Duration, String),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn transport_error(message: &str) -> Self {
        Self::Error(ModelsErrorKind::Http {
            provider: "mock".to_string(),
            message: message.to_string(),
        })
    }
}

/// Replays queued responses in order, then a fallback reply.
#[derive(Debug)]
pub struct MockDriver {
    queue: Mutex<VecDeque<MockResponse>>,
    fallback: MockResponse,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    /// Driver that answers every call with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self::scripted(Vec::new(), MockResponse::Text(text.into()))
    }

    /// Driver replaying `responses`, then `fallback` forever.
    pub fn scripted(responses: Vec<MockResponse>, fallback: MockResponse) -> Self {
        Self {
            queue: Mutex::new(responses.into()),
            fallback,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// System prompts of every call, in order.
    pub fn systems(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.system().clone())
            .collect()
    }
}

#[async_trait]
impl AesopDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> AesopResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());
        let next = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match next {
            MockResponse::Text(text) => Ok(GenerateResponse::new(text, None)),
            MockResponse::Error(kind) => Err(ModelsError::new(kind).into()),
            MockResponse::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(GenerateResponse::new(text, None))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
