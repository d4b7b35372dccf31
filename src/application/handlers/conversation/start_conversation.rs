//! StartConversationHandler - Command handler for creating primed sessions.

use std::sync::Arc;

use super::apply_agent_turn::ConversationResult;
use super::turn_processor::{TurnError, TurnProcessor};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Handler for starting conversations.
pub struct StartConversationHandler {
    store: Arc<dyn SessionStore>,
    processor: Arc<TurnProcessor>,
}

impl StartConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>, processor: Arc<TurnProcessor>) -> Self {
        Self { store, processor }
    }

    /// Creates a session, runs the priming turn and stores it.
    pub async fn handle(&self) -> Result<ConversationResult, TurnError> {
        let (session, result) = self.processor.start(SessionId::new()).await?;
        let snapshot = session.snapshot();
        self.store.insert(session).await?;

        Ok(ConversationResult {
            reply: result.reply,
            outcome: result.outcome,
            session: snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session_store::InMemorySessionStore;
    use crate::application::handlers::conversation::ResponseSelector;
    use crate::domain::conversation::{Phase, ReplyIntent, ScenarioKind};

    fn handler(store: Arc<InMemorySessionStore>, scenario: ScenarioKind) -> StartConversationHandler {
        let processor = Arc::new(TurnProcessor::new(ResponseSelector::templated(), scenario));
        StartConversationHandler::new(store, processor)
    }

    #[tokio::test]
    async fn starts_and_stores_primed_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let result = handler(store.clone(), ScenarioKind::CoverageInquiry)
            .handle()
            .await
            .unwrap();

        assert_eq!(result.outcome.intent, ReplyIntent::Opening);
        assert_eq!(result.session.phase, Phase::Introduction);
        assert_eq!(result.session.transcript.len(), 2);
        assert!(store.get(&result.session.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn uses_configured_scenario() {
        let store = Arc::new(InMemorySessionStore::new());
        let result = handler(store, ScenarioKind::PlanStatus).handle().await.unwrap();

        assert_eq!(result.session.scenario, ScenarioKind::PlanStatus);
        assert!(result.reply.contains("John Doe"));
    }

    #[tokio::test]
    async fn each_start_creates_a_new_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler(store.clone(), ScenarioKind::CoverageInquiry);

        let a = handler.handle().await.unwrap();
        let b = handler.handle().await.unwrap();

        assert_ne!(a.session.id, b.session.id);
        assert_eq!(store.len().await.unwrap(), 2);
    }
}
