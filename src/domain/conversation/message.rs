//! Persisted transcript entries.
//!
//! A [`StoredMessage`] only ever holds ciphertext. Plaintext exists in memory
//! for the duration of one request and is never written to a store.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};
use crate::domain::wellbeing::EmotionalState;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// Ordinary reply.
    Assistant,
    /// Reply that was sent together with crisis resources.
    Crisis,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Crisis => "crisis",
        }
    }

    /// Whether the entry was written by the user.
    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }
}

/// An immutable, encrypted transcript entry.
///
/// # Invariants
///
/// - `ciphertext` is the codec output of the exact text that was classified
/// - entries are append-only; nothing mutates a stored message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: MessageId,
    pub role: Role,
    pub ciphertext: String,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<EmotionalState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl StoredMessage {
    /// User turn, tagged with the classified emotional state.
    pub fn user(
        ciphertext: String,
        emotional_state: EmotionalState,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            ciphertext,
            created_at,
            emotional_state: Some(emotional_state),
            suggestions: None,
        }
    }

    /// Reply turn. `crisis` selects [`Role::Crisis`] over [`Role::Assistant`].
    pub fn reply(
        ciphertext: String,
        suggestions: Vec<String>,
        crisis: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: MessageId::new(),
            role: if crisis { Role::Crisis } else { Role::Assistant },
            ciphertext,
            created_at,
            emotional_state: None,
            suggestions: Some(suggestions),
        }
    }
}
