//! Conversation domain module.
//!
//! The dialogue state machine of a simulated support call: phases, the facts
//! learned along the way, rule-based extraction, the transition policy,
//! reply selection and the session aggregate that ties them together.

mod engine;
mod extractor;
mod facts;
mod phase;
mod responses;
mod sanitizer;
mod session;
mod transcript;
pub mod configs;

pub use configs::{PlanVocabulary, Scenario, ScenarioKind};
pub use engine::PhaseTransitionPolicy;
pub use extractor::{Extraction, FactExtractor};
pub use facts::{FactSet, FactUpdate, PlanStatus};
pub use phase::Phase;
pub use responses::{select_reply, ClosingReason, ReplyIntent, ReplySource};
pub use sanitizer::{ResponseSanitizer, SanitizationError, MAX_UTTERANCE_LENGTH};
pub use session::{ConversationSession, SessionSnapshot, SessionStateError, TurnDecision};
pub use transcript::{Speaker, Transcript, Turn};
