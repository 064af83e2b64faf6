//! Per-request pipeline stages for an inbound chat message.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Stage of one `send_message` request.
///
/// Valid transitions (strictly linear, no stage may be skipped):
/// - Received -> Classified
/// - Classified -> Generated
/// - Generated -> Persisted
/// - Persisted -> Responded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStage {
    #[default]
    Received,
    Classified,
    Generated,
    Persisted,
    Responded,
}

impl RequestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStage::Received => "received",
            RequestStage::Classified => "classified",
            RequestStage::Generated => "generated",
            RequestStage::Persisted => "persisted",
            RequestStage::Responded => "responded",
        }
    }

    fn next(&self) -> Option<RequestStage> {
        use RequestStage::*;
        match self {
            Received => Some(Classified),
            Classified => Some(Generated),
            Generated => Some(Persisted),
            Persisted => Some(Responded),
            Responded => None,
        }
    }
}

impl StateMachine for RequestStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next().as_ref() == Some(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_the_full_pipeline() {
        let stage = RequestStage::default()
            .transition_to(RequestStage::Classified)
            .and_then(|s| s.transition_to(RequestStage::Generated))
            .and_then(|s| s.transition_to(RequestStage::Persisted))
            .and_then(|s| s.transition_to(RequestStage::Responded))
            .unwrap();
        assert!(stage.is_terminal());
    }

    #[test]
    fn cannot_skip_persistence() {
        assert!(RequestStage::Generated
            .transition_to(RequestStage::Responded)
            .is_err());
    }

    #[test]
    fn cannot_go_backwards() {
        assert!(!RequestStage::Persisted.can_transition_to(&RequestStage::Generated));
    }

    #[test]
    fn only_responded_is_terminal() {
        assert!(!RequestStage::Received.is_terminal());
        assert!(RequestStage::Responded.is_terminal());
        assert_eq!(
            RequestStage::Classified.valid_transitions(),
            vec![RequestStage::Generated]
        );
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(RequestStage::Persisted.to_string(), "persisted");
    }
}
