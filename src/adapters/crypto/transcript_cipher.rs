//! AES-256-GCM transcript codec.
//!
//! Wire format is three colon-separated hex segments:
//!
//! ```text
//! hex(key_version ‖ nonce[12]) : hex(tag[16]) : hex(body)
//! ```
//!
//! Every call to [`MessageCipher::encrypt`] draws a fresh 96-bit nonce from
//! the system CSPRNG. The tag is bound to a fixed associated-data string so a
//! value sealed for another purpose under the same key will not open here.

use std::collections::HashMap;
use std::fmt;

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

use crate::ports::{CodecError, MessageCipher};

const AAD: &[u8] = b"solace-transcript";
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Generate a random 32-byte key suitable for AES-256-GCM.
pub fn generate_key() -> Result<[u8; KEY_LEN], CodecError> {
    let rng = SystemRandom::new();
    let mut key = [0u8; KEY_LEN];
    rng.fill(&mut key).map_err(|_| CodecError::Encryption)?;
    Ok(key)
}

/// Decode a 64 character hex key.
pub fn parse_key_hex(hex_key: &str) -> Result<[u8; KEY_LEN], CodecError> {
    let bytes = hex::decode(hex_key.trim())
        .map_err(|e| CodecError::Malformed(format!("key is not hex: {e}")))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        CodecError::Malformed(format!("key must be {KEY_LEN} bytes, got {}", b.len()))
    })
}

/// Immutable codec holding the active key and any retired keys still needed
/// to read older transcripts.
pub struct TranscriptCipher {
    active_version: u8,
    keys: HashMap<u8, LessSafeKey>,
    rng: SystemRandom,
}

impl TranscriptCipher {
    pub fn new(key_version: u8, key: &[u8; KEY_LEN]) -> Result<Self, CodecError> {
        let mut keys = HashMap::new();
        keys.insert(key_version, Self::load_key(key)?);
        Ok(Self {
            active_version: key_version,
            keys,
            rng: SystemRandom::new(),
        })
    }

    /// Registers a decrypt-only key for a previous version.
    pub fn with_retired_key(
        mut self,
        key_version: u8,
        key: &[u8; KEY_LEN],
    ) -> Result<Self, CodecError> {
        if key_version != self.active_version {
            self.keys.insert(key_version, Self::load_key(key)?);
        }
        Ok(self)
    }

    pub fn active_version(&self) -> u8 {
        self.active_version
    }

    fn load_key(key: &[u8; KEY_LEN]) -> Result<LessSafeKey, CodecError> {
        let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| CodecError::Encryption)?;
        Ok(LessSafeKey::new(unbound))
    }

    fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>, CodecError> {
        hex::decode(segment).map_err(|e| CodecError::Malformed(format!("{name} segment: {e}")))
    }
}

impl fmt::Debug for TranscriptCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptCipher")
            .field("active_version", &self.active_version)
            .field("key_count", &self.keys.len())
            .finish()
    }
}

impl MessageCipher for TranscriptCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        let key = self
            .keys
            .get(&self.active_version)
            .ok_or(CodecError::UnknownKeyVersion(self.active_version))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CodecError::Encryption)?;

        let mut body = plaintext.as_bytes().to_vec();
        let tag = key
            .seal_in_place_separate_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::from(AAD),
                &mut body,
            )
            .map_err(|_| CodecError::Encryption)?;

        let mut header = Vec::with_capacity(1 + NONCE_LEN);
        header.push(self.active_version);
        header.extend_from_slice(&nonce_bytes);

        Ok(format!(
            "{}:{}:{}",
            hex::encode(header),
            hex::encode(tag.as_ref()),
            hex::encode(body)
        ))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CodecError> {
        let segments: Vec<&str> = ciphertext.split(':').collect();
        let [header, tag, body] = segments.as_slice() else {
            return Err(CodecError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        let header = Self::decode_segment("nonce", header)?;
        let tag = Self::decode_segment("tag", tag)?;
        let body = Self::decode_segment("body", body)?;

        if header.len() != 1 + NONCE_LEN {
            return Err(CodecError::Malformed(format!(
                "nonce segment must be {} bytes, got {}",
                1 + NONCE_LEN,
                header.len()
            )));
        }
        if tag.len() != TAG_LEN {
            return Err(CodecError::Malformed(format!(
                "tag must be {TAG_LEN} bytes, got {}",
                tag.len()
            )));
        }

        let version = header[0];
        let key = self
            .keys
            .get(&version)
            .ok_or(CodecError::UnknownKeyVersion(version))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(&header[1..]);

        let mut in_out = body;
        in_out.extend_from_slice(&tag);
        let plaintext = key
            .open_in_place(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::from(AAD),
                &mut in_out,
            )
            .map_err(|_| CodecError::Integrity)?;

        String::from_utf8(plaintext.to_vec()).map_err(|_| CodecError::Integrity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Opened;

    fn cipher() -> TranscriptCipher {
        TranscriptCipher::new(1, &generate_key().unwrap()).unwrap()
    }

    #[test]
    fn roundtrip() {
        let c = cipher();
        let sealed = c.encrypt("I had a rough day").unwrap();
        assert_eq!(c.decrypt(&sealed).unwrap(), "I had a rough day");
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let c = cipher();
        let sealed = c.encrypt("").unwrap();
        assert!(sealed.ends_with(':'));
        assert_eq!(c.decrypt(&sealed).unwrap(), "");
    }

    #[test]
    fn format_is_three_hex_segments() {
        let sealed = cipher().encrypt("hello").unwrap();
        let parts: Vec<&str> = sealed.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 26);
        assert!(parts[0].starts_with("01"));
        assert_eq!(parts[1].len(), 32);
        assert_eq!(parts[2].len(), 10);
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let c = cipher();
        assert_ne!(c.encrypt("same").unwrap(), c.encrypt("same").unwrap());
    }

    #[test]
    fn wrong_key_fails_integrity() {
        let sealed = cipher().encrypt("secret").unwrap();
        assert_eq!(cipher().decrypt(&sealed), Err(CodecError::Integrity));
    }

    #[test]
    fn flipped_body_bit_fails_integrity() {
        let c = cipher();
        let sealed = c.encrypt("do not tamper").unwrap();
        let parts: Vec<&str> = sealed.split(':').collect();
        let mut body = hex::decode(parts[2]).unwrap();
        body[0] ^= 0x01;
        let tampered = format!("{}:{}:{}", parts[0], parts[1], hex::encode(body));
        assert_eq!(c.decrypt(&tampered), Err(CodecError::Integrity));
    }

    #[test]
    fn bad_segments_are_malformed() {
        let c = cipher();
        assert!(matches!(c.decrypt("a:b"), Err(CodecError::Malformed(_))));
        assert!(matches!(c.decrypt("zz:zz:zz"), Err(CodecError::Malformed(_))));
        assert!(matches!(c.decrypt("00:00:00"), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn unknown_key_version_is_reported() {
        let key = generate_key().unwrap();
        let sealed = TranscriptCipher::new(7, &key).unwrap().encrypt("x").unwrap();
        let reader = TranscriptCipher::new(1, &key).unwrap();
        assert_eq!(reader.decrypt(&sealed), Err(CodecError::UnknownKeyVersion(7)));
    }

    #[test]
    fn retired_key_still_decrypts() {
        let old_key = generate_key().unwrap();
        let old = TranscriptCipher::new(1, &old_key).unwrap();
        let sealed = old.encrypt("from before rotation").unwrap();

        let rotated = TranscriptCipher::new(2, &generate_key().unwrap())
            .unwrap()
            .with_retired_key(1, &old_key)
            .unwrap();
        assert_eq!(rotated.decrypt(&sealed).unwrap(), "from before rotation");
        assert!(rotated.encrypt("new").unwrap().starts_with("02"));
    }

    #[test]
    fn open_classifies_stored_values() {
        let c = cipher();
        let sealed = c.encrypt("hi").unwrap();
        assert_eq!(c.open(&sealed), Opened::Decrypted("hi".to_string()));
        assert_eq!(c.open("plain old text"), Opened::Legacy("plain old text".to_string()));
        assert_eq!(c.open("a:b:c"), Opened::Unverified("a:b:c".to_string()));
    }

    #[test]
    fn parse_key_hex_checks_length() {
        assert!(parse_key_hex(&"ab".repeat(32)).is_ok());
        assert!(matches!(parse_key_hex("abcd"), Err(CodecError::Malformed(_))));
        assert!(matches!(parse_key_hex(&"zz".repeat(32)), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let rendered = format!("{:?}", cipher());
        assert!(rendered.contains("active_version"));
        assert!(!rendered.contains("LessSafeKey"));
    }
}
