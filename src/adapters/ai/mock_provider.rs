//! Scripted AI provider for tests and local runs without API keys.
//!
//! Replies are consumed in FIFO order; once the script runs dry a fixed
//! default reply is returned. Latency and failures can be injected to drive
//! the timeout and fallback paths of the response generator.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_reply("That sounds hard. What happened?")
//!     .with_failure(MockError::Unavailable { message: "down".into() })
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Reply returned once the script is exhausted.
pub const MOCK_DEFAULT_REPLY: &str = "Mock response";

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Reply {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    Failure(MockError),
}

/// Injectable failure kinds.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u64 },
    Malformed { message: String },
    Empty,
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
            MockError::Malformed { message } => AIError::parse(message),
            MockError::Empty => AIError::EmptyResponse,
        }
    }
}

/// Scripted [`AIProvider`].
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    delay: Duration,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 128000),
            delay: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.with_reply_finishing(content, FinishReason::Stop)
    }

    /// Queues a reply that reports `finish_reason`.
    pub fn with_reply_finishing(
        self,
        content: impl Into<String>,
        finish_reason: FinishReason,
    ) -> Self {
        self.push(MockResponse::Reply {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
            finish_reason,
        })
    }

    /// Queues a failure.
    pub fn with_failure(self, error: MockError) -> Self {
        self.push(MockResponse::Failure(error))
    }

    /// Simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Every request received, in order.
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.lock_requests().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
        self
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<CompletionRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_response(&self) -> MockResponse {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| MockResponse::Reply {
                content: MOCK_DEFAULT_REPLY.to_string(),
                usage: TokenUsage::new(5, 10),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.lock_requests().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Reply {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Failure(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
