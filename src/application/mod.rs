//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

mod engine;
pub mod handlers;
mod response_generator;

pub use engine::{ConversationEngine, ConversationEngineBuilder};
pub use handlers::{
    AssessCrisisCommand, AssessCrisisHandler, AssessCrisisResult, ContentStatus,
    ConversationError, DeleteHistoryCommand, DeleteHistoryHandler, DeleteHistoryResult,
    GetHistoryHandler, GetHistoryQuery, GetHistoryResult, HistoryEntry, SendMessageCommand,
    SendMessageHandler, SendMessageResult, StartSessionHandler, StartSessionResult,
    HISTORY_DELETED,
};
pub use response_generator::{
    GeneratedReply, GeneratorSettings, HistoryTurn, ReplySource, ResponseGenerator,
    SYSTEM_PROMPT,
};
