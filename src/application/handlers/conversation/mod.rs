//! Conversation command and query handlers.
//!
//! Starting sessions, handling user turns, and reading or deleting transcripts.

mod delete_history;
mod error;
mod get_history;
mod send_message;
mod start_session;

pub use delete_history::{
    DeleteHistoryCommand, DeleteHistoryHandler, DeleteHistoryResult, HISTORY_DELETED,
};
pub use error::ConversationError;
pub use get_history::{
    ContentStatus, GetHistoryHandler, GetHistoryQuery, GetHistoryResult, HistoryEntry,
};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use start_session::{StartSessionHandler, StartSessionResult};
