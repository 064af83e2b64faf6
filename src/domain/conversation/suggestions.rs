//! Fixed reply content: greeting, fallback reply and suggestion chips.

use crate::domain::wellbeing::EmotionalState;

/// Opening message for a new session.
pub const GREETING: &str = "Hi there! I'm here to listen and support you. \
    How are you feeling today? You can share anything that's on your mind.";

/// Suggestions shown with the greeting.
pub const GREETING_SUGGESTIONS: [&str; 3] =
    ["Mood check-in", "Share your thoughts", "Wellness tips"];

/// Reply used whenever the generation backend is missing or fails.
///
/// Deliberately independent of the emotional state.
pub const FALLBACK_REPLY: &str = "I'm really glad you reached out. I'm here with you. \
    Do you want to tell me a little more about what you're feeling?";

/// Follow-up suggestions keyed by emotional state. Always 1 to 3 entries.
pub fn suggestions_for(state: EmotionalState) -> &'static [&'static str] {
    match state {
        EmotionalState::VeryNegative => &[
            "Try slow breathing",
            "Reach out to someone you trust",
            "Crisis helpline",
        ],
        EmotionalState::Negative => &["Grounding exercise", "Short walk", "Journaling"],
        EmotionalState::Neutral => &["Daily reflection"],
        EmotionalState::SlightlyPositive => &["Notice what helped today"],
        EmotionalState::Positive => &["Celebrate progress"],
    }
}

/// Owned copy of [`suggestions_for`], for response payloads.
pub fn suggestion_list(state: EmotionalState) -> Vec<String> {
    suggestions_for(state).iter().map(|s| s.to_string()).collect()
}

pub fn greeting_suggestions() -> Vec<String> {
    GREETING_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EmotionalState; 5] = [
        EmotionalState::VeryNegative,
        EmotionalState::Negative,
        EmotionalState::Neutral,
        EmotionalState::SlightlyPositive,
        EmotionalState::Positive,
    ];

    #[test]
    fn every_state_has_one_to_three_suggestions() {
        for state in ALL {
            let n = suggestions_for(state).len();
            assert!((1..=3).contains(&n), "{state} has {n}");
        }
    }

    #[test]
    fn very_negative_points_at_helpline() {
        assert!(suggestion_list(EmotionalState::VeryNegative)
            .contains(&"Crisis helpline".to_string()));
    }

    #[test]
    fn greeting_suggestions_are_fixed() {
        assert_eq!(
            greeting_suggestions(),
            vec!["Mood check-in", "Share your thoughts", "Wellness tips"]
        );
    }

    #[test]
    fn fallback_is_not_empty() {
        assert!(!FALLBACK_REPLY.trim().is_empty());
    }
}
