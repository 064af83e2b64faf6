//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{conversation_error, json_rejection};
use crate::application::{
    DeleteHistoryCommand, DeleteHistoryHandler, GetHistoryHandler, GetHistoryQuery,
    SendMessageCommand, SendMessageHandler, StartSessionHandler,
};

use super::dto::{
    DeleteHistoryResponse, HistoryResponse, SendMessageRequest, SendMessageResponse,
    StartSessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatHandlers {
    start_handler: Arc<StartSessionHandler>,
    send_handler: Arc<SendMessageHandler>,
    history_handler: Arc<GetHistoryHandler>,
    delete_handler: Arc<DeleteHistoryHandler>,
    verbose_errors: bool,
}

impl ChatHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        send_handler: Arc<SendMessageHandler>,
        history_handler: Arc<GetHistoryHandler>,
        delete_handler: Arc<DeleteHistoryHandler>,
    ) -> Self {
        Self {
            start_handler,
            send_handler,
            history_handler,
            delete_handler,
            verbose_errors: false,
        }
    }

    /// Attach underlying causes to 500 responses.
    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/start - Open a session
pub async fn start_session(State(handlers): State<ChatHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(result) => (StatusCode::OK, Json(StartSessionResponse::from(result))).into_response(),
        Err(e) => conversation_error(e, "Failed to start chat session", handlers.verbose_errors),
    }
}

/// POST /api/chat/message - Send a user message
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let cmd = SendMessageCommand::new(
        req.session_id.unwrap_or_default(),
        req.message.unwrap_or_default(),
    );

    match handlers.send_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(SendMessageResponse::from(result))).into_response(),
        Err(e) => conversation_error(e, "Failed to process message", handlers.verbose_errors),
    }
}

/// GET /api/chat/history/:sessionId - Read the decrypted transcript
pub async fn get_history(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers.history_handler.handle(GetHistoryQuery::new(session_id)).await {
        Ok(result) => (StatusCode::OK, Json(HistoryResponse::from(result))).into_response(),
        Err(e) => conversation_error(e, "Failed to retrieve chat history", handlers.verbose_errors),
    }
}

/// DELETE /api/chat/history/:sessionId - Delete the transcript
pub async fn delete_history(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers
        .delete_handler
        .handle(DeleteHistoryCommand::new(session_id))
        .await
    {
        Ok(result) => (StatusCode::OK, Json(DeleteHistoryResponse::from(result))).into_response(),
        Err(e) => conversation_error(e, "Failed to delete chat history", handlers.verbose_errors),
    }
}
