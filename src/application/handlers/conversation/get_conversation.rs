//! GetConversationHandler - Query handler for inspecting a session.

use std::sync::Arc;

use super::turn_processor::TurnError;
use crate::domain::conversation::SessionSnapshot;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Query to fetch a conversation.
#[derive(Debug, Clone, Copy)]
pub struct GetConversationQuery {
    pub session_id: SessionId,
}

/// Handler for reading conversations.
pub struct GetConversationHandler {
    store: Arc<dyn SessionStore>,
}

impl GetConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetConversationQuery) -> Result<SessionSnapshot, TurnError> {
        let handle = self
            .store
            .get(&query.session_id)
            .await?
            .ok_or(TurnError::SessionNotFound(query.session_id))?;

        let session = handle.lock().await;
        Ok(session.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session_store::InMemorySessionStore;
    use crate::domain::conversation::{ConversationSession, ScenarioKind};

    #[tokio::test]
    async fn returns_snapshot_of_stored_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = ConversationSession::new(SessionId::new(), ScenarioKind::CoverageInquiry);
        let id = session.id();
        store.insert(session).await.unwrap();

        let handler = GetConversationHandler::new(store);
        let snapshot = handler.handle(GetConversationQuery { session_id: id }).await.unwrap();

        assert_eq!(snapshot.id, id);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetConversationHandler::new(Arc::new(InMemorySessionStore::new()));
        let result = handler
            .handle(GetConversationQuery {
                session_id: SessionId::new(),
            })
            .await;
        assert!(matches!(result, Err(TurnError::SessionNotFound(_))));
    }
}
