//! ApplyAgentTurnHandler - Command handler for one agent utterance.
//!
//! Two variants: against a stored session (the session's mutex is held for
//! the whole turn) and against a caller-held snapshot.

use std::sync::Arc;

use serde::Serialize;

use super::turn_processor::{TurnError, TurnOutcome, TurnProcessor};
use crate::domain::conversation::{ConversationSession, SessionSnapshot};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Command to apply an agent utterance to a stored session.
#[derive(Debug, Clone)]
pub struct ApplyAgentTurnCommand {
    pub session_id: SessionId,
    pub utterance: String,
}

/// Updated session plus the bot's reply.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResult {
    pub reply: String,
    pub outcome: TurnOutcome,
    pub session: SessionSnapshot,
}

/// Handler for applying agent turns.
pub struct ApplyAgentTurnHandler {
    store: Arc<dyn SessionStore>,
    processor: Arc<TurnProcessor>,
}

impl ApplyAgentTurnHandler {
    pub fn new(store: Arc<dyn SessionStore>, processor: Arc<TurnProcessor>) -> Self {
        Self { store, processor }
    }

    pub async fn handle(&self, cmd: ApplyAgentTurnCommand) -> Result<ConversationResult, TurnError> {
        let handle = self
            .store
            .get(&cmd.session_id)
            .await?
            .ok_or(TurnError::SessionNotFound(cmd.session_id))?;

        let mut session = handle.lock().await;
        let result = self
            .processor
            .apply_agent_turn(&mut session, &cmd.utterance)
            .await?;

        Ok(ConversationResult {
            reply: result.reply,
            outcome: result.outcome,
            session: session.snapshot(),
        })
    }

    /// Applies a turn to a snapshot held by the caller. Nothing is stored.
    pub async fn handle_snapshot(
        &self,
        snapshot: SessionSnapshot,
        utterance: &str,
    ) -> Result<ConversationResult, TurnError> {
        let mut session = ConversationSession::restore(snapshot)?;
        let result = self.processor.apply_agent_turn(&mut session, utterance).await?;

        Ok(ConversationResult {
            reply: result.reply,
            outcome: result.outcome,
            session: session.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session_store::InMemorySessionStore;
    use crate::application::handlers::conversation::ResponseSelector;
    use crate::domain::conversation::{Phase, ScenarioKind, SessionStateError};

    struct Fixture {
        store: Arc<InMemorySessionStore>,
        processor: Arc<TurnProcessor>,
        handler: ApplyAgentTurnHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemorySessionStore::new());
        let processor = Arc::new(TurnProcessor::new(
            ResponseSelector::templated(),
            ScenarioKind::CoverageInquiry,
        ));
        let handler = ApplyAgentTurnHandler::new(store.clone(), processor.clone());
        Fixture {
            store,
            processor,
            handler,
        }
    }

    async fn stored_session(f: &Fixture) -> SessionId {
        let (session, _) = f.processor.start(SessionId::new()).await.unwrap();
        let id = session.id();
        f.store.insert(session).await.unwrap();
        id
    }

    fn cmd(session_id: SessionId, utterance: &str) -> ApplyAgentTurnCommand {
        ApplyAgentTurnCommand {
            session_id,
            utterance: utterance.to_string(),
        }
    }

    #[tokio::test]
    async fn applies_turn_to_stored_session() {
        let f = fixture();
        let id = stored_session(&f).await;

        let result = f.handler.handle(cmd(id, "My name is Maria")).await.unwrap();

        assert_eq!(result.outcome.phase, Phase::QueueConfirmation);
        assert_eq!(result.session.transcript.len(), 4);

        let stored = f.store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.lock().await.phase(), Phase::QueueConfirmation);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let f = fixture();
        let missing = SessionId::new();
        let result = f.handler.handle(cmd(missing, "Hello")).await;
        assert!(matches!(result, Err(TurnError::SessionNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn blank_utterance_leaves_stored_session_untouched() {
        let f = fixture();
        let id = stored_session(&f).await;

        let result = f.handler.handle(cmd(id, "  ")).await;

        assert!(matches!(result, Err(TurnError::EmptyUtterance)));
        let stored = f.store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.lock().await.transcript().len(), 2);
    }

    #[tokio::test]
    async fn snapshot_turn_does_not_touch_store() {
        let f = fixture();
        let (session, _) = f.processor.start(SessionId::new()).await.unwrap();

        let result = f
            .handler
            .handle_snapshot(session.snapshot(), "Hi, this is Maria speaking")
            .await
            .unwrap();

        assert_eq!(result.session.facts.agent_name.as_deref(), Some("Maria"));
        assert_eq!(f.store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn inconsistent_snapshot_is_rejected() {
        let f = fixture();
        let (session, _) = f.processor.start(SessionId::new()).await.unwrap();
        let mut snapshot = session.snapshot();
        snapshot.phase = Phase::Authentication;

        let result = f.handler.handle_snapshot(snapshot, "Verified").await;

        assert!(matches!(
            result,
            Err(TurnError::InvalidSession(SessionStateError::FactsInconsistent { .. }))
        ));
    }
}
