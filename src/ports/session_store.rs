//! Session Store Port - Interface for persisting encrypted transcripts.
//!
//! A transcript is an ordered, append-only list of [`StoredMessage`]s keyed by
//! a [`SessionId`]. Implementations enforce a per-session TTL: every write
//! refreshes it, and an expired session is indistinguishable from one that
//! never existed.

use async_trait::async_trait;

use crate::domain::conversation::StoredMessage;
use crate::domain::foundation::SessionId;

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize transcript: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize transcript: {0}")]
    DeserializationFailed(String),
}

/// Port for transcript persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the transcript, or `None` if the session is unknown or expired.
    async fn get(&self, id: &SessionId) -> Result<Option<Vec<StoredMessage>>, StoreError>;

    /// Replace the transcript (an empty list is a valid value).
    async fn set(&self, id: &SessionId, messages: Vec<StoredMessage>) -> Result<(), StoreError>;

    /// Atomically append `messages` to the transcript, creating it if needed.
    ///
    /// Concurrent appends on one session serialize; each call's entries stay
    /// contiguous. Returns the new transcript length.
    async fn append(
        &self,
        id: &SessionId,
        messages: Vec<StoredMessage>,
    ) -> Result<usize, StoreError>;

    /// Remove the transcript. Deleting an unknown session is not an error.
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Whether a live transcript exists.
    async fn has(&self, id: &SessionId) -> Result<bool, StoreError>;

    /// Short backend name for health reporting.
    fn backend_name(&self) -> &'static str;
}
