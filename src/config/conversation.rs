//! Conversation configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::handlers::conversation::DEFAULT_PRIMING_UTTERANCE;
use crate::domain::conversation::ScenarioKind;

/// Conversation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Scenario for new sessions
    #[serde(default)]
    pub scenario: ScenarioKind,

    /// Ask the generation service for free-form lines
    #[serde(default = "default_generation_enabled")]
    pub generation_enabled: bool,

    /// Bound on one generation call, in seconds
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,

    /// Agent line recorded when a session is primed
    #[serde(default = "default_priming_utterance")]
    pub priming_utterance: String,
}

impl ConversationConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.generation_timeout_secs == 0 {
            return Err(ValidationError::InvalidGenerationTimeout);
        }
        if self.priming_utterance.trim().is_empty() {
            return Err(ValidationError::BlankPrimingUtterance);
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioKind::default(),
            generation_enabled: default_generation_enabled(),
            generation_timeout_secs: default_generation_timeout(),
            priming_utterance: default_priming_utterance(),
        }
    }
}

fn default_generation_enabled() -> bool {
    true
}

fn default_generation_timeout() -> u64 {
    15
}

fn default_priming_utterance() -> String {
    DEFAULT_PRIMING_UTTERANCE.to_string()
}
