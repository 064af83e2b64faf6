//! SendMessage command handler.
//!
//! Runs one user turn through the pipeline:
//! validate, classify, load history, generate, encrypt, append, respond.
//! Each step advances a [`RequestStage`], so a stage can never be skipped.

use std::sync::Arc;

use crate::application::{HistoryTurn, ReplySource, ResponseGenerator};
use crate::domain::conversation::{RequestStage, StoredMessage, UserMessage};
use crate::domain::foundation::{SessionId, StateMachine, Timestamp};
use crate::domain::wellbeing::{
    CrisisContacts, CrisisLevel, CrisisResources, EmotionalState, RiskClassifier,
};
use crate::ports::{MessageCipher, Opened, SessionStore};

use super::ConversationError;

/// Command to send a user message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Raw handle as received from the client.
    pub session_id: String,
    /// Raw message text, sanitised by the handler.
    pub message: String,
}

impl SendMessageCommand {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
        }
    }
}

/// Reply to one user turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub session_id: SessionId,
    pub message: String,
    pub emotional_state: EmotionalState,
    pub suggestions: Vec<String>,
    pub timestamp: Timestamp,
    /// Present only when the escalation gate fired.
    pub crisis: Option<CrisisResources>,
    pub source: ReplySource,
    pub level: CrisisLevel,
}

impl SendMessageResult {
    pub fn crisis_detected(&self) -> bool {
        self.crisis.is_some()
    }
}

/// Handler for user turns.
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    cipher: Arc<dyn MessageCipher>,
    classifier: RiskClassifier,
    generator: ResponseGenerator,
    contacts: CrisisContacts,
}

impl SendMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        cipher: Arc<dyn MessageCipher>,
        classifier: RiskClassifier,
        generator: ResponseGenerator,
        contacts: CrisisContacts,
    ) -> Self {
        Self {
            store,
            cipher,
            classifier,
            generator,
            contacts,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, ConversationError> {
        let session_id: SessionId = cmd.session_id.parse()?;
        let text = UserMessage::parse(&cmd.message)?;
        let received_at = Timestamp::now();
        let stage = RequestStage::Received;

        // Classification is pure and cannot fail.
        let report = self.classifier.evaluate(text.as_str());
        let detection = report.detection();
        let emotional_state = report.sentiment.emotional_state;
        let level = report.assessment.level;
        let stage = self.advance(stage, RequestStage::Classified, &session_id)?;

        if detection.is_crisis {
            tracing::warn!(
                session_id = %session_id.short(),
                level = %level,
                confidence = detection.confidence,
                "crisis indicators detected"
            );
        }

        let history = self.load_history(&session_id).await?;
        let reply = self
            .generator
            .generate(text.as_str(), emotional_state, &history, Some(&session_id))
            .await;
        let stage = self.advance(stage, RequestStage::Generated, &session_id)?;

        // Encrypt both turns before touching the store so a codec failure
        // leaves the transcript unchanged.
        let user_ciphertext = self
            .cipher
            .encrypt(text.as_str())
            .map_err(ConversationError::Encryption)?;
        let reply_ciphertext = self
            .cipher
            .encrypt(&reply.message)
            .map_err(ConversationError::Encryption)?;

        let length = self
            .store
            .append(
                &session_id,
                vec![
                    StoredMessage::user(user_ciphertext, emotional_state, received_at),
                    StoredMessage::reply(
                        reply_ciphertext,
                        reply.suggestions.clone(),
                        detection.is_crisis,
                        reply.timestamp,
                    ),
                ],
            )
            .await?;
        let stage = self.advance(stage, RequestStage::Persisted, &session_id)?;

        let result = SendMessageResult {
            session_id,
            message: reply.message,
            emotional_state,
            suggestions: reply.suggestions,
            timestamp: reply.timestamp,
            crisis: detection.is_crisis.then(|| self.contacts.resources()),
            source: reply.source,
            level,
        };
        self.advance(stage, RequestStage::Responded, &result.session_id)?;

        tracing::info!(
            session_id = %result.session_id.short(),
            source = result.source.as_str(),
            level = %level,
            emotional_state = %emotional_state,
            transcript_len = length,
            "message handled"
        );

        Ok(result)
    }

    fn advance(
        &self,
        from: RequestStage,
        to: RequestStage,
        session_id: &SessionId,
    ) -> Result<RequestStage, ConversationError> {
        let stage = from
            .transition_to(to)
            .map_err(|e| ConversationError::Internal(e.to_string()))?;
        tracing::debug!(session_id = %session_id.short(), stage = %stage, "stage reached");
        Ok(stage)
    }

    /// Decrypted prior turns. Entries that fail verification are left out of
    /// the prompt; legacy plaintext entries are kept.
    async fn load_history(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<HistoryTurn>, ConversationError> {
        let stored = self.store.get(session_id).await?.unwrap_or_default();
        Ok(stored
            .into_iter()
            .filter_map(|entry| match self.cipher.open(&entry.ciphertext) {
                Opened::Decrypted(text) | Opened::Legacy(text) => {
                    Some(HistoryTurn::new(entry.role, text))
                }
                Opened::Unverified(_) => None,
            })
            .collect())
    }
}
