//! StartSessionHandler - opens a new conversation.

use std::sync::Arc;

use crate::domain::conversation::{greeting_suggestions, GREETING};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::wellbeing::EmotionalState;
use crate::ports::SessionStore;

use super::ConversationError;

/// Result of opening a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub message: String,
    pub emotional_state: EmotionalState,
    pub suggestions: Vec<String>,
    pub timestamp: Timestamp,
}

/// Handler for opening sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Mints a handle, stores an empty transcript and returns the greeting.
    pub async fn handle(&self) -> Result<StartSessionResult, ConversationError> {
        let session_id = SessionId::generate().map_err(|_| {
            ConversationError::Internal("failed to generate session handle".to_string())
        })?;

        self.store.set(&session_id, Vec::new()).await?;

        tracing::info!(
            session_id = %session_id.short(),
            store = self.store.backend_name(),
            "session started"
        );

        Ok(StartSessionResult {
            session_id,
            message: GREETING.to_string(),
            emotional_state: EmotionalState::Neutral,
            suggestions: greeting_suggestions(),
            timestamp: Timestamp::now(),
        })
    }
}
