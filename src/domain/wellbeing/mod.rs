//! Wellbeing domain - sentiment scoring and crisis risk assessment.
//!
//! Everything here is pure and synchronous: no I/O, no clocks, no randomness.

mod classifier;
mod crisis;
mod emotional_state;
mod guidance;
mod lexicon;
mod sentiment;

pub use classifier::{RiskClassifier, RiskReport};
pub use crisis::{
    CrisisAssessment, CrisisDetection, CrisisIndicators, CrisisLevel, CrisisPolicy, CrisisRule,
    KEYWORD_MATCH_CONFIDENCE,
};
pub use emotional_state::EmotionalState;
pub use guidance::{CrisisContacts, CrisisGuidance, CrisisResources, GuidancePriority};
pub use lexicon::{
    KeywordSet, Lexicon, CRISIS_MARKERS, HIGH_RISK_MARKERS, NEGATIVE_MARKERS, POSITIVE_MARKERS,
};
pub use sentiment::SentimentResult;
