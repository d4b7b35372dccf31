//! Turn processor - the single entry point for applying an agent turn.
//!
//! extractor → transition policy → reply selection → rendering → commit.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::response_selector::ResponseSelector;
use crate::domain::conversation::{
    ConversationSession, FactExtractor, Phase, PhaseTransitionPolicy, ReplyIntent, ReplySource,
    ScenarioKind, SessionStateError,
};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, StateMachine};

/// Agent line used to prime new and reset sessions.
pub const DEFAULT_PRIMING_UTTERANCE: &str =
    "Hello, this is customer support. How can I help you today?";

/// Errors that reject a turn. The session is left unchanged.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    #[error("Agent utterance cannot be empty")]
    EmptyUtterance,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Invalid session state: {0}")]
    InvalidSession(#[from] SessionStateError),

    #[error("Session store error: {0}")]
    Store(String),
}

impl From<DomainError> for TurnError {
    fn from(err: DomainError) -> Self {
        TurnError::Store(err.to_string())
    }
}

impl TurnError {
    /// Error code used by the HTTP layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            TurnError::EmptyUtterance => ErrorCode::EmptyField,
            TurnError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            TurnError::InvalidSession(_) => ErrorCode::InvalidSessionState,
            TurnError::Store(_) => ErrorCode::StoreError,
        }
    }
}

/// What a turn did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub previous_phase: Phase,
    pub phase: Phase,
    pub transitioned: bool,
    pub intent: ReplyIntent,
    pub reply_source: ReplySource,
    /// Indicator that produced a fact, if any.
    pub matched_indicator: Option<&'static str>,
}

/// The bot's reply plus the turn outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnResult {
    pub reply: String,
    pub outcome: TurnOutcome,
}

/// Applies agent turns to sessions.
#[derive(Debug, Clone)]
pub struct TurnProcessor {
    policy: PhaseTransitionPolicy,
    selector: ResponseSelector,
    scenario: ScenarioKind,
    priming_utterance: String,
}

impl TurnProcessor {
    pub fn new(selector: ResponseSelector, scenario: ScenarioKind) -> Self {
        Self {
            policy: PhaseTransitionPolicy::new(),
            selector,
            scenario,
            priming_utterance: DEFAULT_PRIMING_UTTERANCE.to_string(),
        }
    }

    pub fn with_priming_utterance(mut self, utterance: impl Into<String>) -> Self {
        self.priming_utterance = utterance.into();
        self
    }

    /// Scenario for newly started sessions.
    pub fn scenario(&self) -> ScenarioKind {
        self.scenario
    }

    pub fn priming_utterance(&self) -> &str {
        &self.priming_utterance
    }

    /// Creates a session and runs the priming turn.
    pub async fn start(&self, id: SessionId) -> Result<(ConversationSession, TurnResult), TurnError> {
        let mut session = ConversationSession::new(id, self.scenario);
        let result = self.prime(&mut session).await?;
        info!(session_id = %id, scenario = %self.scenario, "Conversation started");
        Ok((session, result))
    }

    /// Clears the session and runs the priming turn again.
    pub async fn reset(&self, session: &mut ConversationSession) -> Result<TurnResult, TurnError> {
        session.reset();
        let result = self.prime(session).await?;
        info!(session_id = %session.id(), "Conversation reset");
        Ok(result)
    }

    async fn prime(&self, session: &mut ConversationSession) -> Result<TurnResult, TurnError> {
        let utterance = self.priming_utterance.clone();
        self.apply_agent_turn(session, &utterance).await
    }

    /// Applies one agent utterance and returns the bot's reply.
    ///
    /// Blank utterances are rejected before anything is recorded.
    pub async fn apply_agent_turn(
        &self,
        session: &mut ConversationSession,
        utterance: &str,
    ) -> Result<TurnResult, TurnError> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(TurnError::EmptyUtterance);
        }

        let scenario = session.scenario().scenario();
        let extractor = FactExtractor::new(scenario);
        let decision = session.decide_turn(utterance, &extractor, &self.policy);

        if let Some(indicator) = decision.matched() {
            debug!(
                session_id = %session.id(),
                phase = ?decision.previous_phase(),
                indicator,
                "Extracted fact"
            );
        }
        if decision.transitioned() {
            if let Err(err) = decision.previous_phase().transition_to(decision.phase()) {
                warn!(session_id = %session.id(), error = %err, "Rejected phase transition");
                return Err(SessionStateError::IllegalTransition {
                    from: decision.previous_phase(),
                    to: decision.phase(),
                }
                .into());
            }
            info!(
                session_id = %session.id(),
                from = ?decision.previous_phase(),
                to = ?decision.phase(),
                "Phase transition"
            );
        }

        let rendered = self
            .selector
            .render(session.id(), scenario, decision.intent(), decision.facts())
            .await;

        let outcome = TurnOutcome {
            previous_phase: decision.previous_phase(),
            phase: decision.phase(),
            transitioned: decision.transitioned(),
            intent: decision.intent(),
            reply_source: rendered.source,
            matched_indicator: decision.matched(),
        };

        session.commit_turn(decision, rendered.text.clone());
        if outcome.transitioned && session.is_concluded() {
            info!(session_id = %session.id(), intent = ?outcome.intent, "Conversation concluded");
        }

        Ok(TurnResult {
            reply: rendered.text,
            outcome,
        })
    }
}
