//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;

pub use conversation::{
    ApplyAgentTurnCommand, ApplyAgentTurnHandler, ConversationResult, EndConversationHandler,
    GetConversationHandler, GetConversationQuery, RenderedReply, ResetConversationHandler, ResponseSelector,
    StartConversationHandler, TurnError, TurnOutcome, TurnProcessor, TurnResult,
    DEFAULT_GENERATION_TIMEOUT, DEFAULT_PRIMING_UTTERANCE,
};
