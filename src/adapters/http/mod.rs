//! HTTP adapters - REST API implementations.

pub mod conversation;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::application::handlers::conversation::{
    ApplyAgentTurnHandler, EndConversationHandler, GetConversationHandler,
    ResetConversationHandler, StartConversationHandler, TurnProcessor,
};
use crate::ports::SessionStore;

pub use conversation::{conversation_routes, health, ConversationHandlers};

impl ConversationHandlers {
    /// Wires every conversation handler to one store and processor.
    pub fn from_parts(store: Arc<dyn SessionStore>, processor: Arc<TurnProcessor>) -> Self {
        Self::new(
            Arc::new(StartConversationHandler::new(store.clone(), processor.clone())),
            Arc::new(ApplyAgentTurnHandler::new(store.clone(), processor.clone())),
            Arc::new(ResetConversationHandler::new(store.clone(), processor)),
            Arc::new(GetConversationHandler::new(store.clone())),
            Arc::new(EndConversationHandler::new(store)),
        )
    }
}

/// Full application router: `/health` plus the API under `/api`.
pub fn app_router(handlers: ConversationHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", conversation_routes(handlers))
}
