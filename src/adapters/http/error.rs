//! JSON error body shared by all HTTP adapters.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::ConversationError;
use crate::domain::foundation::{ErrorCode, ValidationError};

/// Error body: `{error, message, details?}` where `error` is a stable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{resource} not found"))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// 400 for a field that failed validation.
pub fn validation_error(error: &ValidationError) -> Response {
    ErrorResponse::bad_request(error.to_string())
        .with_details(serde_json::json!({ "field": error.field() }))
        .into_response_with(StatusCode::BAD_REQUEST)
}

/// 400 for a body that is not valid JSON.
pub fn json_rejection(rejection: JsonRejection) -> Response {
    ErrorResponse::bad_request("Request body must be a JSON object")
        .with_details(serde_json::json!({ "reason": rejection.body_text() }))
        .into_response_with(StatusCode::BAD_REQUEST)
}

/// Maps a handler error to a response.
///
/// Server-side failures carry a generic `fallback` message; the underlying
/// cause is attached as `details` only when `verbose` is set.
pub fn conversation_error(error: ConversationError, fallback: &str, verbose: bool) -> Response {
    match &error {
        ConversationError::Validation(e) => validation_error(e),
        _ => {
            tracing::error!(error = %error, code = %error.code(), "request failed");
            let mut body = ErrorResponse::new(error.code(), fallback);
            if verbose {
                body = body.with_details(serde_json::json!({ "reason": error.to_string() }));
            }
            body.into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
