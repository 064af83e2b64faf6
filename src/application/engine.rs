//! ConversationEngine - the handler set built over one store, codec and generator.

use std::sync::Arc;

use crate::domain::wellbeing::{CrisisContacts, RiskClassifier};
use crate::ports::{MessageCipher, SessionStore};

use super::handlers::{
    AssessCrisisHandler, DeleteHistoryHandler, GetHistoryHandler, SendMessageHandler,
    StartSessionHandler,
};
use super::ResponseGenerator;

/// All conversation handlers, sharing their collaborators by `Arc`.
#[derive(Clone)]
pub struct ConversationEngine {
    pub start_session: Arc<StartSessionHandler>,
    pub send_message: Arc<SendMessageHandler>,
    pub get_history: Arc<GetHistoryHandler>,
    pub delete_history: Arc<DeleteHistoryHandler>,
    pub assess_crisis: Arc<AssessCrisisHandler>,
    store: Arc<dyn SessionStore>,
}

impl ConversationEngine {
    pub fn builder(
        store: Arc<dyn SessionStore>,
        cipher: Arc<dyn MessageCipher>,
    ) -> ConversationEngineBuilder {
        ConversationEngineBuilder {
            store,
            cipher,
            generator: ResponseGenerator::fallback_only(),
            classifier: RiskClassifier::default(),
            contacts: CrisisContacts::default(),
        }
    }

    /// Backend name of the session store, for health reporting.
    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }
}

pub struct ConversationEngineBuilder {
    store: Arc<dyn SessionStore>,
    cipher: Arc<dyn MessageCipher>,
    generator: ResponseGenerator,
    classifier: RiskClassifier,
    contacts: CrisisContacts,
}

impl ConversationEngineBuilder {
    pub fn generator(mut self, generator: ResponseGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn classifier(mut self, classifier: RiskClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn contacts(mut self, contacts: CrisisContacts) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn build(self) -> ConversationEngine {
        ConversationEngine {
            start_session: Arc::new(StartSessionHandler::new(self.store.clone())),
            send_message: Arc::new(SendMessageHandler::new(
                self.store.clone(),
                self.cipher.clone(),
                self.classifier.clone(),
                self.generator,
                self.contacts.clone(),
            )),
            get_history: Arc::new(GetHistoryHandler::new(self.store.clone(), self.cipher)),
            delete_history: Arc::new(DeleteHistoryHandler::new(self.store.clone())),
            assess_crisis: Arc::new(AssessCrisisHandler::new(self.classifier, self.contacts)),
            store: self.store,
        }
    }
}
