//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text generation backends
//! - `SessionStore` - Encrypted transcript persistence with TTL
//! - `MessageCipher` - Authenticated encryption of transcript text

mod ai_provider;
mod message_cipher;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use message_cipher::{CodecError, MessageCipher, Opened};
pub use session_store::{SessionStore, StoreError};
