//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat-completion backend
//! - `UtteranceGenerator` - Free-form customer lines for a reply intent
//! - `SessionStore` - Holds sessions between turns

mod ai_provider;
mod session_store;
mod utterance_generator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use session_store::{SessionHandle, SessionStore};
pub use utterance_generator::{UtteranceGenerator, UtteranceRequest};
