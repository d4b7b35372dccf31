//! Request and response bodies for conversation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::conversation::{ConversationResult, TurnOutcome};
use crate::domain::conversation::SessionSnapshot;
use crate::domain::foundation::StateMachine;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/conversations/:id/turns`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyTurnRequest {
    pub utterance: String,
}

/// Body of `POST /api/turns`.
///
/// The session stays raw JSON so a bad snapshot becomes a 422 with a
/// diagnostic instead of a generic extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct StatelessTurnRequest {
    pub session: serde_json::Value,
    pub utterance: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Conversation view: the full snapshot plus derived fields.
///
/// Serializes to a superset of `SessionSnapshot`, so it can be posted back to
/// `POST /api/turns` as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub phase_label: &'static str,
    pub goal: &'static str,
    pub missing_fact: Option<&'static str>,
    pub concluded: bool,
}

impl From<SessionSnapshot> for ConversationResponse {
    fn from(session: SessionSnapshot) -> Self {
        Self {
            phase_label: session.phase.label(),
            goal: session.phase.goal(),
            missing_fact: session.facts.missing_for(session.phase),
            concluded: session.phase.is_terminal(),
            session,
        }
    }
}

/// Reply to one applied turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub reply: String,
    pub outcome: TurnOutcome,
    pub conversation: ConversationResponse,
}

impl From<ConversationResult> for TurnResponse {
    fn from(result: ConversationResult) -> Self {
        Self {
            reply: result.reply,
            outcome: result.outcome,
            conversation: result.session.into(),
        }
    }
}

/// Error body: `{ "code": ..., "message": ... }`.
///
/// A rejected caller-held session is echoed back unmodified in `session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            session: None,
        }
    }

    pub fn with_session(mut self, session: serde_json::Value) -> Self {
        self.session = Some(session);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "An internal error occurred")
    }
}
