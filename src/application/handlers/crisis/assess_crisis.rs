//! AssessCrisis query handler - detailed view of the canonical assessment.

use crate::domain::conversation::UserMessage;
use crate::domain::foundation::{SessionId, Timestamp, ValidationError};
use crate::domain::wellbeing::{
    CrisisAssessment, CrisisContacts, CrisisGuidance, EmotionalState, RiskClassifier,
};

/// Request for a level assessment.
#[derive(Debug, Clone)]
pub struct AssessCrisisCommand {
    pub message: String,
    /// Caller-supplied state; derived from the message when absent.
    pub emotional_state: Option<EmotionalState>,
    /// Echoed back when present. Not validated against the store.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AssessCrisisResult {
    pub assessment: CrisisAssessment,
    pub guidance: CrisisGuidance,
    pub timestamp: Timestamp,
    pub session_id: Option<SessionId>,
}

/// Handler for crisis assessments.
#[derive(Debug, Clone)]
pub struct AssessCrisisHandler {
    classifier: RiskClassifier,
    contacts: CrisisContacts,
}

impl AssessCrisisHandler {
    pub fn new(classifier: RiskClassifier, contacts: CrisisContacts) -> Self {
        Self {
            classifier,
            contacts,
        }
    }

    pub fn handle(&self, cmd: AssessCrisisCommand) -> Result<AssessCrisisResult, ValidationError> {
        let text = UserMessage::parse(&cmd.message)?;
        let session_id = cmd
            .session_id
            .as_deref()
            .map(str::parse::<SessionId>)
            .transpose()?;

        let assessment = match cmd.emotional_state {
            Some(state) => self.classifier.assess_crisis_level(text.as_str(), state),
            None => self.classifier.evaluate(text.as_str()).assessment,
        };
        let guidance = self.contacts.guidance(assessment.level);

        if assessment.requires_escalation() {
            tracing::warn!(
                session_id = %session_id.as_ref().map(|s| s.short()).unwrap_or("-"),
                level = %assessment.level,
                "crisis assessment escalated"
            );
        }

        Ok(AssessCrisisResult {
            assessment,
            guidance,
            timestamp: Timestamp::now(),
            session_id,
        })
    }
}
