//! EndConversationHandler - Command handler for hanging up a call.
//!
//! Drops the session from the store and hands back its final state.

use std::sync::Arc;

use tracing::info;

use super::turn_processor::TurnError;
use crate::domain::conversation::SessionSnapshot;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Handler for ending conversations.
pub struct EndConversationHandler {
    store: Arc<dyn SessionStore>,
}

impl EndConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Removes the session once any in-flight turn on it has finished.
    pub async fn handle(&self, session_id: SessionId) -> Result<SessionSnapshot, TurnError> {
        let handle = self
            .store
            .get(&session_id)
            .await?
            .ok_or(TurnError::SessionNotFound(session_id))?;

        let session = handle.lock().await;
        if !self.store.remove(&session_id).await? {
            return Err(TurnError::SessionNotFound(session_id));
        }

        let remaining = self.store.len().await?;
        info!(
            session_id = %session_id,
            turns = session.transcript().len(),
            remaining,
            "Conversation ended"
        );
        Ok(session.snapshot())
    }
}
