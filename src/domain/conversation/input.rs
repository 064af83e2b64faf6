//! Inbound message validation and sanitisation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::ValidationError;

/// Maximum accepted message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

static ANGLE_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<>]").expect("static regex"));
static SCRIPT_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("static regex"));
static INLINE_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+=").expect("static regex"));

/// Strips markup-ish fragments and caps the length.
///
/// Applied before classification so the classifier, the generator and the
/// codec all see the same text.
pub fn sanitize(input: &str) -> String {
    let text = input.trim();
    let text = ANGLE_BRACKETS.replace_all(text, "");
    let text = SCRIPT_SCHEME.replace_all(&text, "");
    let text = INLINE_HANDLER.replace_all(&text, "");
    text.chars().take(MAX_MESSAGE_CHARS).collect()
}

/// A message that passed validation and sanitisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage(String);

impl UserMessage {
    /// Validates `raw` (1..=1000 chars after trimming) and sanitises it.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the message is blank, before or after sanitising
    /// - `OutOfRange` if the trimmed message is too long
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        let len = trimmed.chars().count();
        if len > MAX_MESSAGE_CHARS {
            return Err(ValidationError::out_of_range("message", 1, MAX_MESSAGE_CHARS, len));
        }
        let clean = sanitize(trimmed);
        if clean.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        Ok(Self(clean))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
