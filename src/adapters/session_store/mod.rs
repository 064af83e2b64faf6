//! Session store implementations.
//!
//! - `InMemorySessionStore` - single-process storage for development and tests
//! - `RedisSessionStore` - durable storage shared across instances

mod in_memory;
mod redis;

pub use in_memory::{spawn_reaper, InMemorySessionStore};
pub use self::redis::RedisSessionStore;
