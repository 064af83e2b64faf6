//! Failover AI Provider - tries a secondary provider on transient failures.
//!
//! When the primary provider fails with a retryable error (rate limit,
//! unavailable, network, timeout) the request is replayed against the
//! secondary provider if one is configured. Non-retryable errors such as
//! authentication failures are returned as-is.
//!
//! # Example
//!
//! ```ignore
//! let provider = FailoverAIProvider::new(Arc::new(openai))
//!     .with_fallback(Arc::new(anthropic));
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Primary provider with an optional secondary.
#[derive(Clone)]
pub struct FailoverAIProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
}

impl FailoverAIProvider {
    pub fn new(primary: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let err = match &self.fallback {
            // Without a secondary, there is no need to keep a copy of the request.
            None => return self.primary.complete(request).await,
            Some(_) => match self.primary.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) => err,
            },
        };

        match &self.fallback {
            Some(fallback) if err.is_retryable() => {
                tracing::warn!(
                    primary = %self.primary.provider_info().name,
                    fallback = %fallback.provider_info().name,
                    reason = %err,
                    session_id = %request.metadata.session_short(),
                    "primary provider failed, switching to fallback"
                );
                fallback.complete(request).await
            }
            _ => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

impl std::fmt::Debug for FailoverAIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverAIProvider")
            .field("primary", &self.primary.provider_info().name)
            .field(
                "fallback",
                &self.fallback.as_ref().map(|p| p.provider_info().name),
            )
            .finish()
    }
}
