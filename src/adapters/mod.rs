//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Generation service clients and the prompted utterance generator
//! - `session_store` - In-memory session storage
//! - `http` - axum REST API

pub mod ai;
pub mod http;
pub mod session_store;

pub use ai::{
    MockAIProvider, OpenAICompatibleConfig, OpenAICompatibleProvider, PromptedUtteranceGenerator,
};
pub use http::{app_router, ConversationHandlers};
pub use session_store::InMemorySessionStore;
