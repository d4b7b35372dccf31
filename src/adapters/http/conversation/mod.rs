//! HTTP adapter for conversation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ApplyTurnRequest, ConversationResponse, ErrorResponse, StatelessTurnRequest, TurnResponse,
};
pub use handlers::{health, ConversationHandlers};
pub use routes::conversation_routes;
