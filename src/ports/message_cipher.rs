//! Message Cipher Port - authenticated encryption of transcript text.

/// Codec failures.
///
/// On the read path these flag the stored value; on the write path they fail
/// the request so plaintext is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Not three hex segments, or a segment has the wrong length.
    #[error("malformed ciphertext: {0}")]
    Malformed(String),

    /// Authentication tag did not verify.
    #[error("ciphertext failed integrity check")]
    Integrity,

    /// Ciphertext was written under a key this process does not hold.
    #[error("unknown key version {0}")]
    UnknownKeyVersion(u8),

    /// Encryption itself failed (RNG or key setup).
    #[error("encryption failed")]
    Encryption,
}

/// Outcome of reading a stored value that may predate encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    /// Decrypted and verified.
    Decrypted(String),
    /// Not in ciphertext format; returned unchanged.
    Legacy(String),
    /// Looked like ciphertext but failed to decrypt; raw value returned.
    Unverified(String),
}

impl Opened {
    pub fn text(&self) -> &str {
        match self {
            Opened::Decrypted(s) | Opened::Legacy(s) | Opened::Unverified(s) => s,
        }
    }
}

/// Synchronous codec over transcript text.
pub trait MessageCipher: Send + Sync {
    /// Encrypts `plaintext` under a fresh nonce.
    fn encrypt(&self, plaintext: &str) -> Result<String, CodecError>;

    /// Decrypts a value produced by [`encrypt`](Self::encrypt).
    fn decrypt(&self, ciphertext: &str) -> Result<String, CodecError>;

    /// Read-path helper: decrypts ciphertext, passes legacy values through
    /// and flags values that fail verification.
    fn open(&self, stored: &str) -> Opened {
        if stored.split(':').count() != 3 {
            return Opened::Legacy(stored.to_string());
        }
        match self.decrypt(stored) {
            Ok(plain) => Opened::Decrypted(plain),
            Err(err) => {
                tracing::warn!(error = %err, "stored message failed to decrypt");
                Opened::Unverified(stored.to_string())
            }
        }
    }
}
