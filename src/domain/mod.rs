//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `wellbeing` - Sentiment scoring, crisis assessment and guidance
//! - `conversation` - Transcript entries, input handling and request stages

pub mod conversation;
pub mod foundation;
pub mod wellbeing;
