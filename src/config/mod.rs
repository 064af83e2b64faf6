//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SOLACE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use solace::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod crisis;
mod encryption;
mod error;
mod features;
mod redis;
mod server;
mod session;

pub use ai::{AiConfig, AiProvider};
pub use crisis::CrisisConfig;
pub use encryption::EncryptionConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use self::redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use session::{SessionConfig, StoreBackend};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration (in-memory store, fallback-only replies,
/// ephemeral encryption key).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Transcript store selection and TTL
    #[serde(default)]
    pub session: SessionConfig,

    /// Redis connection (when `session.store = redis`)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Generation backends (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Transcript encryption key
    #[serde(default)]
    pub encryption: EncryptionConfig,

    /// Helpline contacts
    #[serde(default)]
    pub crisis: CrisisConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SOLACE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SOLACE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SOLACE__SESSION__STORE=redis` -> `session.store = redis`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SOLACE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.session.validate()?;
        if self.session.store == StoreBackend::Redis {
            self.redis.validate()?;
        }
        self.ai.validate()?;
        // A slow backend must resolve to the fallback reply before the HTTP
        // timeout layer answers with an empty 408.
        if self.ai.reply_timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::ReplyTimeoutExceedsRequest);
        }
        self.encryption.validate(self.server.environment)?;
        self.crisis.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
