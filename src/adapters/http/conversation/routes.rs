//! HTTP routes for conversation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    apply_stateless_turn, apply_turn, end_conversation, get_conversation, reset_conversation,
    start_conversation, ConversationHandlers,
};

/// Creates the conversation router. Mounted under `/api`.
pub fn conversation_routes(handlers: ConversationHandlers) -> Router {
    Router::new()
        .route("/conversations", post(start_conversation))
        .route(
            "/conversations/:id",
            get(get_conversation).delete(end_conversation),
        )
        .route("/conversations/:id/turns", post(apply_turn))
        .route("/conversations/:id/reset", post(reset_conversation))
        .route("/turns", post(apply_stateless_turn))
        .with_state(handlers)
}
