//! Level-keyed crisis guidance and escalation resources.

use serde::{Deserialize, Serialize};

use super::CrisisLevel;

/// Urgency tag attached to guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidancePriority {
    Critical,
    High,
    Medium,
    Low,
}

/// What to tell the user for a given crisis level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisGuidance {
    pub immediate: bool,
    pub message: String,
    pub actions: Vec<String>,
    pub priority: GuidancePriority,
    pub follow_up: String,
}

impl CrisisGuidance {
    /// Guidance for `level`, with `helpline` substituted into call-to-action lines.
    pub fn for_level(level: CrisisLevel, helpline: &str) -> Self {
        match level {
            CrisisLevel::Critical => Self {
                immediate: true,
                message: "I'm very concerned about what you've shared. Your safety is the most \
                          important thing right now. Please reach out for immediate help."
                    .to_string(),
                actions: vec![
                    format!("Call a crisis helpline immediately: {helpline}"),
                    "Go to the nearest emergency room".to_string(),
                    "Stay with someone you trust".to_string(),
                    "Remove any means of self-harm from your environment".to_string(),
                ],
                priority: GuidancePriority::Critical,
                follow_up: "Please let someone know you're safe after getting help.".to_string(),
            },
            CrisisLevel::High => Self {
                immediate: true,
                message: "I'm worried about you. It sounds like you're going through an \
                          extremely difficult time. Please consider reaching out for \
                          professional support."
                    .to_string(),
                actions: vec![
                    format!("Call a mental health helpline: {helpline}"),
                    "Contact a trusted friend or family member".to_string(),
                    "Consider speaking with a counselor or therapist".to_string(),
                    "Use grounding techniques to stay present".to_string(),
                ],
                priority: GuidancePriority::High,
                follow_up: "You don't have to face this alone. There are people who want to help."
                    .to_string(),
            },
            CrisisLevel::Moderate => Self {
                immediate: false,
                message: "I can see you're really struggling right now. It's okay to not be \
                          okay, and it's important to take care of yourself."
                    .to_string(),
                actions: vec![
                    "Try some breathing exercises or grounding techniques".to_string(),
                    "Reach out to a friend or family member".to_string(),
                    "Consider professional support if these feelings persist".to_string(),
                    "Focus on basic self-care: rest, nutrition, gentle movement".to_string(),
                ],
                priority: GuidancePriority::Medium,
                follow_up: "These feelings are temporary, even when they don't feel that way."
                    .to_string(),
            },
            CrisisLevel::Low => Self {
                immediate: false,
                message: "Thank you for sharing how you're feeling. It takes courage to be \
                          open about your struggles."
                    .to_string(),
                actions: vec![
                    "Continue using self-help tools and techniques".to_string(),
                    "Stay connected with supportive people".to_string(),
                    "Monitor your mood and reach out if things get worse".to_string(),
                ],
                priority: GuidancePriority::Low,
                follow_up: "Remember, seeking help is a sign of strength, not weakness."
                    .to_string(),
            },
        }
    }
}

/// Helpline contacts surfaced on escalation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisContacts {
    pub helpline_number: String,
    pub immediate_support: Vec<String>,
}

impl CrisisContacts {
    pub fn new(helpline_number: impl Into<String>, immediate_support: Vec<String>) -> Self {
        Self {
            helpline_number: helpline_number.into(),
            immediate_support,
        }
    }

    /// Payload attached to a chat reply when the escalation gate fires.
    pub fn resources(&self) -> CrisisResources {
        CrisisResources {
            helpline: self.helpline_number.clone(),
            message: "I'm really concerned about what you're going through. You deserve \
                      support, and help is available right now."
                .to_string(),
            immediate_support: self.immediate_support.clone(),
        }
    }

    pub fn guidance(&self, level: CrisisLevel) -> CrisisGuidance {
        CrisisGuidance::for_level(level, &self.helpline_number)
    }
}

impl Default for CrisisContacts {
    fn default() -> Self {
        Self::new(
            "1800-599-0019",
            vec![
                "KIRAN Mental Health Helpline: 1800-599-0019".to_string(),
                "iCall: 022-25521111".to_string(),
            ],
        )
    }
}

/// Crisis payload on a chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResources {
    pub helpline: String,
    pub message: String,
    pub immediate_support: Vec<String>,
}
