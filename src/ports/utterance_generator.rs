//! Utterance generator port.
//!
//! Turns a reply intent plus the known facts into a free-form customer line.
//! The core treats it as a black box that may fail or return empty text; every
//! intent has a template fallback.

use async_trait::async_trait;

use super::AIError;
use crate::domain::conversation::{FactSet, ReplyIntent, Scenario};
use crate::domain::foundation::SessionId;

/// What the customer should say next, and what it knows so far.
#[derive(Debug, Clone, Copy)]
pub struct UtteranceRequest<'a> {
    pub session_id: SessionId,
    pub scenario: &'a Scenario,
    pub intent: ReplyIntent,
    pub facts: &'a FactSet,
}

/// Port for natural-language generation of customer lines.
#[async_trait]
pub trait UtteranceGenerator: Send + Sync {
    /// Generate the customer's next line.
    async fn generate(&self, request: UtteranceRequest<'_>) -> Result<String, AIError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_generator_is_object_safe() {
        fn _accepts_dyn(_generator: &dyn UtteranceGenerator) {}
    }
}
