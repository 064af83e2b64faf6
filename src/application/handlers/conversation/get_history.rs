//! GetHistory query handler.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::conversation::Role;
use crate::domain::foundation::{MessageId, SessionId, Timestamp};
use crate::domain::wellbeing::EmotionalState;
use crate::ports::{MessageCipher, Opened, SessionStore};

use super::ConversationError;

/// Query for a session's transcript.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub session_id: String,
}

impl GetHistoryQuery {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// How an entry's `content` was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Decrypted,
    Legacy,
    Unverified,
}

/// One decrypted transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub created_at: Timestamp,
    pub emotional_state: Option<EmotionalState>,
    pub suggestions: Option<Vec<String>>,
    pub content_status: ContentStatus,
}

#[derive(Debug, Clone)]
pub struct GetHistoryResult {
    pub session_id: SessionId,
    pub messages: Vec<HistoryEntry>,
}

/// Handler for transcript reads.
pub struct GetHistoryHandler {
    store: Arc<dyn SessionStore>,
    cipher: Arc<dyn MessageCipher>,
}

impl GetHistoryHandler {
    pub fn new(store: Arc<dyn SessionStore>, cipher: Arc<dyn MessageCipher>) -> Self {
        Self { store, cipher }
    }

    /// Unknown or expired sessions yield an empty list.
    pub async fn handle(
        &self,
        query: GetHistoryQuery,
    ) -> Result<GetHistoryResult, ConversationError> {
        let session_id: SessionId = query.session_id.parse()?;
        let stored = self.store.get(&session_id).await?.unwrap_or_default();

        let messages: Vec<HistoryEntry> = stored
            .into_iter()
            .map(|entry| {
                let (content, content_status) = match self.cipher.open(&entry.ciphertext) {
                    Opened::Decrypted(text) => (text, ContentStatus::Decrypted),
                    Opened::Legacy(text) => (text, ContentStatus::Legacy),
                    Opened::Unverified(raw) => (raw, ContentStatus::Unverified),
                };
                HistoryEntry {
                    id: entry.id,
                    role: entry.role,
                    content,
                    created_at: entry.created_at,
                    emotional_state: entry.emotional_state,
                    suggestions: entry.suggestions,
                    content_status,
                }
            })
            .collect();

        let unverified = messages
            .iter()
            .filter(|m| m.content_status == ContentStatus::Unverified)
            .count();
        if unverified > 0 {
            tracing::warn!(
                session_id = %session_id.short(),
                unverified,
                "history contains entries that failed verification"
            );
        }

        Ok(GetHistoryResult {
            session_id,
            messages,
        })
    }
}
