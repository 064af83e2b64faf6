//! Risk classifier - pure functions over message text.
//!
//! One canonical evaluation ([`RiskClassifier::evaluate`]) produces both the
//! sentiment and the crisis assessment; the boolean escalation gate is derived
//! from that assessment rather than scored separately, so the two views can
//! never disagree.

use serde::Serialize;

use super::{
    CrisisAssessment, CrisisDetection, CrisisIndicators, CrisisPolicy, EmotionalState, Lexicon,
    SentimentResult,
};

/// Sentiment and canonical assessment for one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub sentiment: SentimentResult,
    pub assessment: CrisisAssessment,
}

impl RiskReport {
    /// The escalation gate used by the conversation pipeline.
    pub fn detection(&self) -> CrisisDetection {
        CrisisDetection::derive(&self.assessment, self.sentiment)
    }
}

/// Table-driven lexical classifier.
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    lexicon: Lexicon,
    policy: CrisisPolicy,
}

impl RiskClassifier {
    pub fn new(lexicon: Lexicon, policy: CrisisPolicy) -> Self {
        Self { lexicon, policy }
    }

    /// Scores `text` against the positive and negative marker tables.
    pub fn analyze_sentiment(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        self.sentiment_of(&lowered)
    }

    /// Assesses `text` using a caller-supplied emotional state.
    ///
    /// Used when the state comes from elsewhere (e.g. a client that already
    /// ran sentiment). [`evaluate`](Self::evaluate) derives it from the text.
    pub fn assess_crisis_level(
        &self,
        text: &str,
        emotional_state: EmotionalState,
    ) -> CrisisAssessment {
        let lowered = text.to_lowercase();
        self.policy.assess(self.indicators_of(&lowered, emotional_state))
    }

    /// Canonical evaluation: sentiment first, then the level table.
    pub fn evaluate(&self, text: &str) -> RiskReport {
        let lowered = text.to_lowercase();
        let sentiment = self.sentiment_of(&lowered);
        let assessment = self
            .policy
            .assess(self.indicators_of(&lowered, sentiment.emotional_state));
        RiskReport {
            sentiment,
            assessment,
        }
    }

    /// Coarse gate: crisis marker present or very negative sentiment.
    pub fn detect_crisis(&self, text: &str) -> CrisisDetection {
        self.evaluate(text).detection()
    }

    fn sentiment_of(&self, lowered: &str) -> SentimentResult {
        SentimentResult::from_hits(
            self.lexicon.positive.hits(lowered),
            self.lexicon.negative.hits(lowered),
        )
    }

    fn indicators_of(&self, lowered: &str, emotional_state: EmotionalState) -> CrisisIndicators {
        CrisisIndicators {
            keyword_match: self.lexicon.crisis.matches(lowered),
            high_risk_keyword_match: self.lexicon.high_risk.matches(lowered),
            emotional_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wellbeing::CrisisLevel;

    fn classifier() -> RiskClassifier {
        RiskClassifier::default()
    }

    #[test]
    fn happy_and_better_is_positive() {
        let result = classifier().analyze_sentiment("I feel happy and better");
        assert_eq!(result.score, 2);
        assert_eq!(result.emotional_state, EmotionalState::Positive);
    }

    #[test]
    fn sentiment_is_case_insensitive() {
        let result = classifier().analyze_sentiment("SAD and LONELY and TIRED");
        assert_eq!(result.score, -3);
        assert_eq!(result.emotional_state, EmotionalState::VeryNegative);
    }

    #[test]
    fn plain_text_is_neutral() {
        let result = classifier().analyze_sentiment("I went to the market");
        assert_eq!(result.score, 0);
        assert_eq!(result.emotional_state, EmotionalState::Neutral);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn kill_myself_is_a_crisis_with_keyword_confidence() {
        let detection = classifier().detect_crisis("I want to kill myself");
        assert!(detection.is_crisis);
        assert_eq!(detection.confidence, 0.9);
    }

    #[test]
    fn very_negative_without_keywords_is_a_crisis() {
        let detection = classifier().detect_crisis("sad, lonely, worthless and tired");
        assert!(detection.is_crisis);
        assert_eq!(detection.sentiment.emotional_state, EmotionalState::VeryNegative);
        assert_eq!(detection.confidence, detection.sentiment.confidence);
    }

    #[test]
    fn mildly_negative_is_not_a_crisis() {
        let detection = classifier().detect_crisis("a bit tired today");
        assert!(!detection.is_crisis);
    }

    #[test]
    fn assess_uses_supplied_emotional_state() {
        let c = classifier();
        let a = c.assess_crisis_level("just a normal day", EmotionalState::VeryNegative);
        assert_eq!(a.level, CrisisLevel::Moderate);
        assert_eq!(a.confidence, 0.60);
    }

    #[test]
    fn crisis_plus_immediacy_is_critical() {
        let a = classifier().assess_crisis_level(
            "I want to end my life tonight",
            EmotionalState::Neutral,
        );
        assert_eq!(a.level, CrisisLevel::Critical);
        assert!(a.indicators.keyword_match);
        assert!(a.indicators.high_risk_keyword_match);
    }

    #[test]
    fn adding_high_risk_keyword_never_lowers_level() {
        let c = classifier();
        let base = "i think about suicide";
        let before = c.assess_crisis_level(base, EmotionalState::Negative);
        let escalated = format!("{base} and i have a plan");
        let after = c.assess_crisis_level(&escalated, EmotionalState::Negative);
        assert!(after.level >= before.level);
        assert_eq!(after.level, CrisisLevel::Critical);
    }

    #[test]
    fn gate_and_detail_view_agree() {
        let c = classifier();
        for text in [
            "I want to kill myself",
            "sad lonely tired worthless",
            "I feel good",
            "tired",
            "goodbye everyone, this is my final message",
        ] {
            let report = c.evaluate(text);
            assert_eq!(
                report.detection().is_crisis,
                report.assessment.level >= CrisisLevel::Moderate,
                "disagreement for {text:?}"
            );
        }
    }
}
