//! HTTP handlers for conversation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::handlers::conversation::{
    ApplyAgentTurnCommand, ApplyAgentTurnHandler, EndConversationHandler, GetConversationHandler,
    GetConversationQuery, ResetConversationHandler, StartConversationHandler, TurnError,
};
use crate::domain::conversation::SessionSnapshot;
use crate::domain::foundation::SessionId;

use super::dto::{
    ApplyTurnRequest, ConversationResponse, ErrorResponse, StatelessTurnRequest, TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ConversationHandlers {
    start_handler: Arc<StartConversationHandler>,
    apply_handler: Arc<ApplyAgentTurnHandler>,
    reset_handler: Arc<ResetConversationHandler>,
    get_handler: Arc<GetConversationHandler>,
    end_handler: Arc<EndConversationHandler>,
}

impl ConversationHandlers {
    pub fn new(
        start_handler: Arc<StartConversationHandler>,
        apply_handler: Arc<ApplyAgentTurnHandler>,
        reset_handler: Arc<ResetConversationHandler>,
        get_handler: Arc<GetConversationHandler>,
        end_handler: Arc<EndConversationHandler>,
    ) -> Self {
        Self {
            start_handler,
            apply_handler,
            reset_handler,
            get_handler,
            end_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/conversations - Start a primed conversation
pub async fn start_conversation(State(handlers): State<ConversationHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(result) => (StatusCode::CREATED, Json(TurnResponse::from(result))).into_response(),
        Err(e) => handle_turn_error(e),
    }
}

/// GET /api/conversations/:id - Inspect a conversation
pub async fn get_conversation(
    State(handlers): State<ConversationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetConversationQuery { session_id }).await {
        Ok(snapshot) => {
            (StatusCode::OK, Json(ConversationResponse::from(snapshot))).into_response()
        }
        Err(e) => handle_turn_error(e),
    }
}

/// POST /api/conversations/:id/turns - Apply an agent utterance
pub async fn apply_turn(
    State(handlers): State<ConversationHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<ApplyTurnRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ApplyAgentTurnCommand {
        session_id,
        utterance: req.utterance,
    };

    match handlers.apply_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(TurnResponse::from(result))).into_response(),
        Err(e) => handle_turn_error(e),
    }
}

/// POST /api/conversations/:id/reset - Restart a conversation
pub async fn reset_conversation(
    State(handlers): State<ConversationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.reset_handler.handle(session_id).await {
        Ok(result) => (StatusCode::OK, Json(TurnResponse::from(result))).into_response(),
        Err(e) => handle_turn_error(e),
    }
}

/// DELETE /api/conversations/:id - End a conversation and free it
pub async fn end_conversation(
    State(handlers): State<ConversationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.end_handler.handle(session_id).await {
        Ok(snapshot) => {
            (StatusCode::OK, Json(ConversationResponse::from(snapshot))).into_response()
        }
        Err(e) => handle_turn_error(e),
    }
}

/// POST /api/turns - Apply an utterance to a caller-held session
pub async fn apply_stateless_turn(
    State(handlers): State<ConversationHandlers>,
    Json(req): Json<StatelessTurnRequest>,
) -> Response {
    let submitted = req.session.clone();
    let snapshot = match SessionSnapshot::from_json(req.session) {
        Ok(snapshot) => snapshot,
        Err(e) => return rejected_session(e.into(), submitted),
    };

    match handlers.apply_handler.handle_snapshot(snapshot, &req.utterance).await {
        Ok(result) => (StatusCode::OK, Json(TurnResponse::from(result))).into_response(),
        Err(e @ TurnError::InvalidSession(_)) => rejected_session(e, submitted),
        Err(e) => handle_turn_error(e),
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

/// 422 that hands the caller's session back untouched.
fn rejected_session(error: TurnError, submitted: serde_json::Value) -> Response {
    let body = ErrorResponse::new(error.code(), error.to_string()).with_session(submitted);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

fn handle_turn_error(error: TurnError) -> Response {
    let code = error.code();
    match error {
        TurnError::EmptyUtterance => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(code, error.to_string())),
        )
            .into_response(),
        TurnError::SessionNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(code, error.to_string())),
        )
            .into_response(),
        TurnError::InvalidSession(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(code, error.to_string())),
        )
            .into_response(),
        TurnError::Store(ref message) => {
            error!(error = %message, "Session store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::SessionStateError;

    #[test]
    fn error_statuses() {
        assert_eq!(
            handle_turn_error(TurnError::EmptyUtterance).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_turn_error(TurnError::SessionNotFound(SessionId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_turn_error(SessionStateError::EmptyAgentName.into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            handle_turn_error(TurnError::Store("lock poisoned".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejected_session_is_unprocessable() {
        let submitted = serde_json::json!({ "phase": "ESCALATION" });
        let response = rejected_session(
            SessionStateError::Malformed("unknown phase".to_string()).into(),
            submitted,
        );
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn invalid_session_id_is_bad_request() {
        let response = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
