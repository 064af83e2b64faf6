//! Lexical sentiment result.

use serde::{Deserialize, Serialize};

use super::EmotionalState;

/// Magnitude at which sentiment confidence saturates.
const CONFIDENCE_SATURATION: f64 = 3.0;

/// Outcome of scoring a text against positive/negative marker tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    /// positive hits minus negative hits
    pub score: i32,
    /// |score|
    pub magnitude: u32,
    pub emotional_state: EmotionalState,
    /// In `[0, 1]`.
    pub confidence: f64,
}

impl SentimentResult {
    /// Builds a result from raw hit counts.
    pub fn from_hits(positive_hits: usize, negative_hits: usize) -> Self {
        let score = positive_hits as i32 - negative_hits as i32;
        let magnitude = score.unsigned_abs();
        Self {
            score,
            magnitude,
            emotional_state: EmotionalState::from_score(score),
            confidence: (magnitude as f64 / CONFIDENCE_SATURATION).min(1.0),
        }
    }

    /// Result for text with no markers at all.
    pub fn neutral() -> Self {
        Self::from_hits(0, 0)
    }
}
