//! Conversation domain module.
//!
//! Transcript entries, inbound message handling, fixed reply content and the
//! per-request pipeline stages.

mod input;
mod message;
mod stage;
mod suggestions;

pub use input::{sanitize, UserMessage, MAX_MESSAGE_CHARS};
pub use message::{Role, StoredMessage};
pub use stage::RequestStage;
pub use suggestions::{
    greeting_suggestions, suggestion_list, suggestions_for, FALLBACK_REPLY, GREETING,
    GREETING_SUGGESTIONS,
};
