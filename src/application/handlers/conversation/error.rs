//! Errors surfaced by conversation handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{CodecError, StoreError};

/// Only validation, storage and encrypt-on-write failures reach a client.
/// Generation failures are absorbed by the fallback reply, and decrypt
/// failures on read are flagged per message instead.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("session store failure: {0}")]
    Store(#[from] StoreError),

    #[error("failed to encrypt message: {0}")]
    Encryption(#[source] CodecError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConversationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConversationError::Validation(_) => ErrorCode::ValidationFailed,
            ConversationError::Store(_) => ErrorCode::StoreUnavailable,
            ConversationError::Encryption(_) => ErrorCode::EncryptionFailed,
            ConversationError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ConversationError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_by_variant() {
        let err: ConversationError = ValidationError::empty_field("message").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.is_client_error());

        let err: ConversationError = StoreError::Unavailable("down".into()).into();
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
        assert!(!err.is_client_error());

        let err = ConversationError::Encryption(CodecError::Encryption);
        assert_eq!(err.code(), ErrorCode::EncryptionFailed);
    }

    #[test]
    fn validation_message_passes_through() {
        let err: ConversationError = ValidationError::empty_field("message").into();
        assert_eq!(err.to_string(), "Field 'message' cannot be empty");
    }
}
