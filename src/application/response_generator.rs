//! Reply generation with a deterministic local fallback.
//!
//! The generator never fails: any backend problem (missing provider, timeout,
//! transport error, empty or malformed reply) is logged and replaced by the
//! fixed fallback message plus the state-keyed suggestions.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;

use crate::domain::conversation::{suggestion_list, Role, FALLBACK_REPLY};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::wellbeing::EmotionalState;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, Message, RequestMetadata,
};

/// Instruction sent ahead of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a warm, empathetic companion offering emotional support. \
You do not diagnose conditions or prescribe treatment. Listen carefully, validate feelings, \
and encourage healthy coping strategies. Keep replies gentle and brief. If the person shows \
signs of crisis or self-harm, kindly encourage them to reach out to someone they trust or to \
a crisis helpline right away.";

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Backend,
    Fallback,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Backend => "backend",
            ReplySource::Fallback => "fallback",
        }
    }
}

/// A decrypted prior turn handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub role: Role,
    pub text: String,
}

impl HistoryTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// User turns stay `user`; assistant and crisis turns become `assistant`.
    fn to_prompt_message(&self) -> Message {
        if self.role.is_user() {
            Message::user(self.text.clone())
        } else {
            Message::assistant(self.text.clone())
        }
    }
}

/// Generation parameters.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Upper bound on a backend call, retries included.
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            temperature: 0.7,
            max_tokens: 250,
        }
    }
}

/// Reply produced for one user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReply {
    pub message: String,
    pub emotional_state: EmotionalState,
    pub suggestions: Vec<String>,
    pub timestamp: Timestamp,
    pub source: ReplySource,
}

/// Reply generator over an optional backend.
#[derive(Clone)]
pub struct ResponseGenerator {
    provider: Option<Arc<dyn AIProvider>>,
    settings: GeneratorSettings,
}

impl ResponseGenerator {
    pub fn new(provider: Option<Arc<dyn AIProvider>>, settings: GeneratorSettings) -> Self {
        Self { provider, settings }
    }

    /// Generator with no backend: every reply is the fallback.
    pub fn fallback_only() -> Self {
        Self::new(None, GeneratorSettings::default())
    }

    pub fn has_backend(&self) -> bool {
        self.provider.is_some()
    }

    /// Produces a reply to `user_text` given the prior transcript.
    pub async fn generate(
        &self,
        user_text: &str,
        emotional_state: EmotionalState,
        history: &[HistoryTurn],
        session_id: Option<&SessionId>,
    ) -> GeneratedReply {
        let suggestions = suggestion_list(emotional_state);
        let session = session_id.map(|s| s.short()).unwrap_or("-");

        let (message, source) = match self.call_backend(user_text, history, session_id).await {
            Ok(text) => (text, ReplySource::Backend),
            Err(err) => {
                if self.provider.is_some() {
                    tracing::warn!(
                        session_id = %session,
                        error = %err,
                        "generation backend failed, using fallback reply"
                    );
                }
                (FALLBACK_REPLY.to_string(), ReplySource::Fallback)
            }
        };

        GeneratedReply {
            message,
            emotional_state,
            suggestions,
            timestamp: Timestamp::now(),
            source,
        }
    }

    async fn call_backend(
        &self,
        user_text: &str,
        history: &[HistoryTurn],
        session_id: Option<&SessionId>,
    ) -> Result<String, AIError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AIError::unavailable("no generation backend configured"))?;

        let mut messages: Vec<Message> =
            history.iter().map(HistoryTurn::to_prompt_message).collect();
        messages.push(Message::user(user_text));

        let trace_id = uuid::Uuid::new_v4().to_string();
        let request = CompletionRequest::new(RequestMetadata::new(session_id.cloned(), trace_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_messages(messages)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = timeout(self.settings.timeout, provider.complete(request))
            .await
            .map_err(|_| AIError::Timeout {
                timeout_secs: self.settings.timeout.as_secs(),
            })??;

        tracing::debug!(
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            finish_reason = ?response.finish_reason,
            "backend reply received"
        );

        match response.finish_reason {
            FinishReason::ContentFilter => {
                return Err(AIError::content_filtered("reply withheld by provider filter"))
            }
            FinishReason::Error => return Err(AIError::parse("provider reported an error")),
            FinishReason::Stop | FinishReason::Length => {}
        }

        let text = response.content.trim();
        if text.is_empty() {
            return Err(AIError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

impl std::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("backend", &self.provider.as_ref().map(|p| p.provider_info().name))
            .field("settings", &self.settings)
            .finish()
    }
}
