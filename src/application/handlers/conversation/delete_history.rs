//! DeleteHistory command handler.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::ConversationError;

/// Confirmation text returned after a delete.
pub const HISTORY_DELETED: &str = "Conversation history deleted successfully";

#[derive(Debug, Clone)]
pub struct DeleteHistoryCommand {
    pub session_id: String,
}

impl DeleteHistoryCommand {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteHistoryResult {
    pub session_id: SessionId,
    pub message: String,
}

/// Handler for transcript deletion. Idempotent.
pub struct DeleteHistoryHandler {
    store: Arc<dyn SessionStore>,
}

impl DeleteHistoryHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteHistoryCommand,
    ) -> Result<DeleteHistoryResult, ConversationError> {
        let session_id: SessionId = cmd.session_id.parse()?;
        self.store.delete(&session_id).await?;

        tracing::info!(session_id = %session_id.short(), "history deleted");

        Ok(DeleteHistoryResult {
            session_id,
            message: HISTORY_DELETED.to_string(),
        })
    }
}
