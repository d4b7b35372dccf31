//! Conversation command and query handlers.
//!
//! Starting, advancing, resetting, inspecting and ending simulated calls.

mod apply_agent_turn;
mod end_conversation;
mod get_conversation;
mod reset_conversation;
mod response_selector;
mod start_conversation;
mod turn_processor;

pub use apply_agent_turn::{ApplyAgentTurnCommand, ApplyAgentTurnHandler, ConversationResult};
pub use end_conversation::EndConversationHandler;
pub use get_conversation::{GetConversationHandler, GetConversationQuery};
pub use reset_conversation::ResetConversationHandler;
pub use response_selector::{RenderedReply, ResponseSelector, DEFAULT_GENERATION_TIMEOUT};
pub use start_conversation::StartConversationHandler;
pub use turn_processor::{
    TurnError, TurnOutcome, TurnProcessor, TurnResult, DEFAULT_PRIMING_UTTERANCE,
};
