//! Transcript encryption configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Transcript key configuration.
///
/// Outside production a missing key is allowed; the binary then generates an
/// ephemeral key, so transcripts do not survive a restart.
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionConfig {
    /// 32-byte key as 64 hex characters.
    pub key: Option<Secret<String>>,

    /// Version byte written into every ciphertext.
    #[serde(default = "default_key_version")]
    pub key_version: u8,
}

impl EncryptionConfig {
    pub fn key_hex(&self) -> Option<&str> {
        self.key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }

    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.key_version == 0 {
            return Err(ValidationError::InvalidKeyVersion);
        }
        match self.key_hex() {
            Some(key) => {
                if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(ValidationError::InvalidEncryptionKey);
                }
            }
            None if environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("ENCRYPTION__KEY"));
            }
            None => {}
        }
        Ok(())
    }
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            key: None,
            key_version: default_key_version(),
        }
    }
}

fn default_key_version() -> u8 {
    1
}
