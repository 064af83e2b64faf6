//! HTTP handlers for crisis endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{json_rejection, validation_error};
use crate::application::{AssessCrisisCommand, AssessCrisisHandler};

use super::dto::{AssessCrisisRequest, AssessCrisisResponse};

#[derive(Clone)]
pub struct CrisisHandlers {
    assess_handler: Arc<AssessCrisisHandler>,
}

impl CrisisHandlers {
    pub fn new(assess_handler: Arc<AssessCrisisHandler>) -> Self {
        Self { assess_handler }
    }
}

/// POST /api/crisis/assess - Level assessment with guidance
pub async fn assess_crisis(
    State(handlers): State<CrisisHandlers>,
    payload: Result<Json<AssessCrisisRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let cmd = AssessCrisisCommand {
        message: req.message.unwrap_or_default(),
        emotional_state: req.emotional_state,
        session_id: req.session_id,
    };

    match handlers.assess_handler.handle(cmd) {
        Ok(result) => (StatusCode::OK, Json(AssessCrisisResponse::from(result))).into_response(),
        Err(e) => validation_error(&e),
    }
}
