//! Crisis contact configuration

use serde::Deserialize;

use crate::domain::wellbeing::CrisisContacts;

use super::error::ValidationError;

/// Helpline details surfaced on escalation.
#[derive(Debug, Clone, Deserialize)]
pub struct CrisisConfig {
    #[serde(default = "default_helpline")]
    pub helpline_number: String,

    /// Comma-separated immediate-support lines.
    pub immediate_support: Option<String>,
}

impl CrisisConfig {
    pub fn contacts(&self) -> CrisisContacts {
        let defaults = CrisisContacts::default();
        let immediate_support = self
            .immediate_support
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|lines| !lines.is_empty())
            .unwrap_or(defaults.immediate_support);
        CrisisContacts::new(self.helpline_number.trim(), immediate_support)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.helpline_number.trim().is_empty() {
            return Err(ValidationError::EmptyHelpline);
        }
        Ok(())
    }
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            helpline_number: default_helpline(),
            immediate_support: None,
        }
    }
}

fn default_helpline() -> String {
    CrisisContacts::default().helpline_number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_built_in_contacts() {
        assert_eq!(CrisisConfig::default().contacts(), CrisisContacts::default());
    }

    #[test]
    fn test_immediate_support_list_parsing() {
        let config = CrisisConfig {
            helpline_number: "988".to_string(),
            immediate_support: Some(
                "988 Lifeline: 988, Crisis Text Line: text HOME to 741741".to_string(),
            ),
        };
        let contacts = config.contacts();
        assert_eq!(contacts.helpline_number, "988");
        assert_eq!(
            contacts.immediate_support,
            vec!["988 Lifeline: 988", "Crisis Text Line: text HOME to 741741"]
        );
    }

    #[test]
    fn test_empty_helpline_rejected() {
        let config = CrisisConfig {
            helpline_number: "  ".to_string(),
            immediate_support: None,
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyHelpline));
    }
}
