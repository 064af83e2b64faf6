//! Solace - supportive conversation service.
//!
//! Accepts a user's message, classifies its emotional and risk content,
//! replies through a generation backend (with a local fallback), keeps an
//! encrypted transcript per session, and escalates to crisis resources when
//! risk indicators are present.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
