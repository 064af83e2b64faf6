//! DTOs for crisis endpoints.

use serde::{Deserialize, Serialize};

use crate::application::AssessCrisisResult;
use crate::domain::foundation::Timestamp;
use crate::domain::wellbeing::{CrisisAssessment, CrisisGuidance, EmotionalState};

/// Body of `POST /api/crisis/assess`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessCrisisRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub emotional_state: Option<EmotionalState>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessCrisisResponse {
    pub assessment: CrisisAssessment,
    pub response: CrisisGuidance,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl From<AssessCrisisResult> for AssessCrisisResponse {
    fn from(result: AssessCrisisResult) -> Self {
        Self {
            assessment: result.assessment,
            response: result.guidance,
            timestamp: result.timestamp,
            session_id: result.session_id.map(|id| id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_optional_state() {
        let req: AssessCrisisRequest =
            serde_json::from_str(r#"{"message":"hi","emotionalState":"very_negative"}"#).unwrap();
        assert_eq!(req.emotional_state, Some(EmotionalState::VeryNegative));
        assert!(req.session_id.is_none());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let unknown_state = r#"{"emotionalState":"sad"}"#;
        assert!(serde_json::from_str::<AssessCrisisRequest>(unknown_state).is_err());
    }
}
