//! ResetConversationHandler - Command handler for the manual reset trigger.

use std::sync::Arc;

use super::apply_agent_turn::ConversationResult;
use super::turn_processor::{TurnError, TurnProcessor};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Handler for resetting conversations.
pub struct ResetConversationHandler {
    store: Arc<dyn SessionStore>,
    processor: Arc<TurnProcessor>,
}

impl ResetConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>, processor: Arc<TurnProcessor>) -> Self {
        Self { store, processor }
    }

    /// Replaces the session with a fresh primed one under the same id.
    pub async fn handle(&self, session_id: SessionId) -> Result<ConversationResult, TurnError> {
        let handle = self
            .store
            .get(&session_id)
            .await?
            .ok_or(TurnError::SessionNotFound(session_id))?;

        let mut session = handle.lock().await;
        let result = self.processor.reset(&mut session).await?;

        Ok(ConversationResult {
            reply: result.reply,
            outcome: result.outcome,
            session: session.snapshot(),
        })
    }
}
