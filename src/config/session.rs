//! Session store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which transcript store backs sessions.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: StoreBackend,

    /// Idle lifetime of a transcript; every write refreshes it.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// How often the in-memory store purges expired sessions.
    #[serde(default = "default_reaper_interval")]
    pub reaper_interval_secs: u64,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.reaper_interval_secs == 0 {
            return Err(ValidationError::InvalidReaperInterval);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            ttl_secs: default_ttl(),
            reaper_interval_secs: default_reaper_interval(),
        }
    }
}

/// Seven days.
fn default_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn default_reaper_interval() -> u64 {
    60
}
