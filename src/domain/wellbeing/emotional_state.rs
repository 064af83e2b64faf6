//! Emotional state buckets derived from lexical sentiment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse emotional state of a message.
///
/// Bucketing is skewed toward the negative side (two negative buckets
/// reachable from small scores, one positive) so risk leans to over-detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    VeryNegative,
    Negative,
    #[default]
    Neutral,
    SlightlyPositive,
    Positive,
}

impl EmotionalState {
    /// Buckets a net sentiment score.
    ///
    /// `<= -3` very negative, `-2..=-1` negative, `>= 2` positive, else neutral.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s <= -3 => EmotionalState::VeryNegative,
            s if s <= -1 => EmotionalState::Negative,
            s if s >= 2 => EmotionalState::Positive,
            _ => EmotionalState::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::VeryNegative => "very_negative",
            EmotionalState::Negative => "negative",
            EmotionalState::Neutral => "neutral",
            EmotionalState::SlightlyPositive => "slightly_positive",
            EmotionalState::Positive => "positive",
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, EmotionalState::VeryNegative | EmotionalState::Negative)
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_buckets_follow_thresholds() {
        assert_eq!(EmotionalState::from_score(-5), EmotionalState::VeryNegative);
        assert_eq!(EmotionalState::from_score(-3), EmotionalState::VeryNegative);
        assert_eq!(EmotionalState::from_score(-2), EmotionalState::Negative);
        assert_eq!(EmotionalState::from_score(-1), EmotionalState::Negative);
        assert_eq!(EmotionalState::from_score(0), EmotionalState::Neutral);
        assert_eq!(EmotionalState::from_score(1), EmotionalState::Neutral);
        assert_eq!(EmotionalState::from_score(2), EmotionalState::Positive);
        assert_eq!(EmotionalState::from_score(7), EmotionalState::Positive);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&EmotionalState::VeryNegative).unwrap();
        assert_eq!(json, "\"very_negative\"");

        let parsed: EmotionalState = serde_json::from_str("\"slightly_positive\"").unwrap();
        assert_eq!(parsed, EmotionalState::SlightlyPositive);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(EmotionalState::Negative.to_string(), "negative");
    }
}
