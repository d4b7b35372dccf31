//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ApplyAgentTurnCommand, ApplyAgentTurnHandler, ConversationResult, EndConversationHandler,
    GetConversationHandler, GetConversationQuery, ResetConversationHandler, ResponseSelector, StartConversationHandler,
    TurnError, TurnOutcome, TurnProcessor, TurnResult,
};
