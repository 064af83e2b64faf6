//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Session TTL must be positive")]
    InvalidSessionTtl,

    #[error("Reaper interval must be positive")]
    InvalidReaperInterval,

    #[error("Encryption key must be 64 hex characters")]
    InvalidEncryptionKey,

    #[error("Encryption key version must be between 1 and 255")]
    InvalidKeyVersion,

    #[error("Reply timeout must be shorter than the request timeout")]
    ReplyTimeoutExceedsRequest,

    #[error("Fallback provider must differ from the primary provider")]
    FallbackSameAsPrimary,

    #[error("Helpline number cannot be empty")]
    EmptyHelpline,
}
