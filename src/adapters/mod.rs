//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generation backends (OpenAI, Anthropic, failover, mock)
//! - `crypto` - AES-256-GCM transcript cipher
//! - `session_store` - Transcript stores (in-memory, Redis)
//! - `http` - REST API

pub mod ai;
pub mod crypto;
pub mod http;
pub mod session_store;
