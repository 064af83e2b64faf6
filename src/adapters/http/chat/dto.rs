//! Request and response DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{
    ContentStatus, DeleteHistoryResult, GetHistoryResult, HistoryEntry, SendMessageResult,
    StartSessionResult,
};
use crate::domain::conversation::Role;
use crate::domain::foundation::Timestamp;
use crate::domain::wellbeing::{CrisisResources, EmotionalState};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/chat/message`. Missing fields surface as validation
/// errors from the handler rather than as extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub message: String,
    pub emotional_state: EmotionalState,
    pub suggestions: Vec<String>,
    pub timestamp: Timestamp,
}

impl From<StartSessionResult> for StartSessionResponse {
    fn from(result: StartSessionResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            message: result.message,
            emotional_state: result.emotional_state,
            suggestions: result.suggestions,
            timestamp: result.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub session_id: String,
    pub message: String,
    pub emotional_state: EmotionalState,
    pub suggestions: Vec<String>,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_detected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_resources: Option<CrisisResources>,
}

impl From<SendMessageResult> for SendMessageResponse {
    fn from(result: SendMessageResult) -> Self {
        let crisis_detected = result.crisis_detected().then_some(true);
        Self {
            session_id: result.session_id.to_string(),
            message: result.message,
            emotional_state: result.emotional_state,
            suggestions: result.suggestions,
            timestamp: result.timestamp,
            crisis_detected,
            crisis_resources: result.crisis,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMessageResponse {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<EmotionalState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub content_status: ContentStatus,
}

impl From<HistoryEntry> for HistoryMessageResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            role: entry.role,
            content: entry.content,
            created_at: entry.created_at,
            emotional_state: entry.emotional_state,
            suggestions: entry.suggestions,
            content_status: entry.content_status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<HistoryMessageResponse>,
}

impl From<GetHistoryResult> for HistoryResponse {
    fn from(result: GetHistoryResult) -> Self {
        Self {
            messages: result.messages.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHistoryResponse {
    pub message: String,
    pub session_id: String,
}

impl From<DeleteHistoryResult> for DeleteHistoryResponse {
    fn from(result: DeleteHistoryResult) -> Self {
        Self {
            message: result.message,
            session_id: result.session_id.to_string(),
        }
    }
}
