//! AI Provider Adapters.
//!
//! - `OpenAICompatibleProvider` - Groq / OpenAI chat completions
//! - `MockAIProvider` - Configurable mock for testing
//! - `PromptedUtteranceGenerator` - UtteranceGenerator on top of any AIProvider

mod mock_provider;
mod openai_compatible;
mod prompted_generator;

pub use mock_provider::{MockAIProvider, MockError};
pub use openai_compatible::{
    OpenAICompatibleConfig, OpenAICompatibleProvider, GROQ_BASE_URL, GROQ_DEFAULT_MODEL,
    OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL,
};
pub use prompted_generator::PromptedUtteranceGenerator;
