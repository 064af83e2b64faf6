//! Crisis level assessment.
//!
//! The level decision is an ordered rule table evaluated top-down, first match
//! wins. Rules are data ([`CrisisRule`]) so thresholds can be inspected and
//! tested independently of the conversation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EmotionalState, SentimentResult};

/// Confidence reported by the escalation gate when a crisis marker matched.
pub const KEYWORD_MATCH_CONFIDENCE: f64 = 0.9;

/// Ordered risk level. `Low < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrisisLevel::Low => "low",
            CrisisLevel::Moderate => "moderate",
            CrisisLevel::High => "high",
            CrisisLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Signals the rule table is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisIndicators {
    pub keyword_match: bool,
    pub high_risk_keyword_match: bool,
    pub emotional_state: EmotionalState,
}

/// Canonical risk view of one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisAssessment {
    pub level: CrisisLevel,
    pub confidence: f64,
    pub indicators: CrisisIndicators,
}

impl CrisisAssessment {
    /// Whether the response must carry crisis resources.
    ///
    /// Moderate and above, i.e. a crisis marker matched or the message is
    /// very negative.
    pub fn requires_escalation(&self) -> bool {
        self.level >= CrisisLevel::Moderate
    }
}

/// Boolean escalation gate derived from a [`CrisisAssessment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisDetection {
    pub is_crisis: bool,
    pub confidence: f64,
    pub sentiment: SentimentResult,
}

impl CrisisDetection {
    pub fn derive(assessment: &CrisisAssessment, sentiment: SentimentResult) -> Self {
        let confidence = if assessment.indicators.keyword_match {
            KEYWORD_MATCH_CONFIDENCE
        } else {
            sentiment.confidence
        };
        Self {
            is_crisis: assessment.requires_escalation(),
            confidence,
            sentiment,
        }
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, Copy)]
pub struct CrisisRule {
    pub name: &'static str,
    pub applies: fn(&CrisisIndicators) -> bool,
    pub level: CrisisLevel,
    pub confidence: f64,
}

/// Ordered decision table with a default outcome.
#[derive(Debug, Clone)]
pub struct CrisisPolicy {
    rules: Vec<CrisisRule>,
    default_level: CrisisLevel,
    default_confidence: f64,
}

impl CrisisPolicy {
    pub fn new(
        rules: Vec<CrisisRule>,
        default_level: CrisisLevel,
        default_confidence: f64,
    ) -> Self {
        Self {
            rules,
            default_level,
            default_confidence,
        }
    }

    /// The production table.
    pub fn standard() -> Self {
        Self::new(
            vec![
                CrisisRule {
                    name: "crisis_and_high_risk",
                    applies: |i| i.keyword_match && i.high_risk_keyword_match,
                    level: CrisisLevel::Critical,
                    confidence: 0.95,
                },
                CrisisRule {
                    name: "crisis_marker",
                    applies: |i| i.keyword_match,
                    level: CrisisLevel::High,
                    confidence: 0.85,
                },
                CrisisRule {
                    name: "very_negative",
                    applies: |i| i.emotional_state == EmotionalState::VeryNegative,
                    level: CrisisLevel::Moderate,
                    confidence: 0.60,
                },
                CrisisRule {
                    name: "negative",
                    applies: |i| i.emotional_state == EmotionalState::Negative,
                    level: CrisisLevel::Low,
                    confidence: 0.40,
                },
            ],
            CrisisLevel::Low,
            0.0,
        )
    }

    pub fn rules(&self) -> &[CrisisRule] {
        &self.rules
    }

    /// Evaluates the table top-down; the first matching rule decides.
    pub fn assess(&self, indicators: CrisisIndicators) -> CrisisAssessment {
        let (level, confidence) = self
            .rules
            .iter()
            .find(|rule| (rule.applies)(&indicators))
            .map(|rule| (rule.level, rule.confidence))
            .unwrap_or((self.default_level, self.default_confidence));

        CrisisAssessment {
            level,
            confidence,
            indicators,
        }
    }
}

impl Default for CrisisPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicators(keyword: bool, high_risk: bool, state: EmotionalState) -> CrisisIndicators {
        CrisisIndicators {
            keyword_match: keyword,
            high_risk_keyword_match: high_risk,
            emotional_state: state,
        }
    }

    #[test]
    fn decision_table_rows() {
        let policy = CrisisPolicy::standard();

        let a = policy.assess(indicators(true, true, EmotionalState::Neutral));
        assert_eq!((a.level, a.confidence), (CrisisLevel::Critical, 0.95));

        let a = policy.assess(indicators(true, false, EmotionalState::Neutral));
        assert_eq!((a.level, a.confidence), (CrisisLevel::High, 0.85));

        let a = policy.assess(indicators(false, true, EmotionalState::VeryNegative));
        assert_eq!((a.level, a.confidence), (CrisisLevel::Moderate, 0.60));

        let a = policy.assess(indicators(false, false, EmotionalState::Negative));
        assert_eq!((a.level, a.confidence), (CrisisLevel::Low, 0.40));

        let a = policy.assess(indicators(false, false, EmotionalState::Positive));
        assert_eq!((a.level, a.confidence), (CrisisLevel::Low, 0.0));
    }

    #[test]
    fn high_risk_alone_does_not_escalate() {
        let a = CrisisPolicy::standard().assess(indicators(false, true, EmotionalState::Neutral));
        assert_eq!(a.level, CrisisLevel::Low);
        assert!(!a.requires_escalation());
    }

    #[test]
    fn first_match_wins_over_emotional_state() {
        let a =
            CrisisPolicy::standard().assess(indicators(true, false, EmotionalState::VeryNegative));
        assert_eq!(a.level, CrisisLevel::High);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(CrisisLevel::Low < CrisisLevel::Moderate);
        assert!(CrisisLevel::Moderate < CrisisLevel::High);
        assert!(CrisisLevel::High < CrisisLevel::Critical);
    }

    #[test]
    fn detection_confidence_prefers_keyword_match() {
        let sentiment = SentimentResult::from_hits(0, 1);
        let assessment =
            CrisisPolicy::standard().assess(indicators(true, false, sentiment.emotional_state));
        let detection = CrisisDetection::derive(&assessment, sentiment);
        assert!(detection.is_crisis);
        assert_eq!(detection.confidence, KEYWORD_MATCH_CONFIDENCE);
    }

    #[test]
    fn detection_falls_back_to_sentiment_confidence() {
        let sentiment = SentimentResult::from_hits(0, 4);
        let assessment =
            CrisisPolicy::standard().assess(indicators(false, false, sentiment.emotional_state));
        let detection = CrisisDetection::derive(&assessment, sentiment);
        assert!(detection.is_crisis);
        assert_eq!(detection.confidence, sentiment.confidence);
    }

    #[test]
    fn custom_policy_uses_its_default() {
        let policy = CrisisPolicy::new(vec![], CrisisLevel::Moderate, 0.5);
        let a = policy.assess(indicators(true, true, EmotionalState::Neutral));
        assert_eq!(a.level, CrisisLevel::Moderate);
        assert_eq!(a.confidence, 0.5);
    }

    #[test]
    fn assessment_serializes_camel_case() {
        let a = CrisisPolicy::standard().assess(indicators(true, true, EmotionalState::Negative));
        let json = serde_json::to_value(a).unwrap();
        assert_eq!(json["level"], "critical");
        assert_eq!(json["indicators"]["highRiskKeywordMatch"], true);
        assert_eq!(json["indicators"]["emotionalState"], "negative");
    }
}
