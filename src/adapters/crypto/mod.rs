//! Transcript encryption.

mod transcript_cipher;

pub use transcript_cipher::{generate_key, parse_key_hex, TranscriptCipher};
