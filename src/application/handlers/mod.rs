//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;
pub mod crisis;

pub use conversation::{
    ContentStatus, ConversationError, DeleteHistoryCommand, DeleteHistoryHandler,
    DeleteHistoryResult, GetHistoryHandler, GetHistoryQuery, GetHistoryResult, HistoryEntry,
    SendMessageCommand, SendMessageHandler, SendMessageResult, StartSessionHandler,
    StartSessionResult, HISTORY_DELETED,
};
pub use crisis::{AssessCrisisCommand, AssessCrisisHandler, AssessCrisisResult};
