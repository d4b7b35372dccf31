//! Domain layer containing the call simulator's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `conversation` - Dialogue state machine, facts, extraction and the session aggregate

pub mod conversation;
pub mod foundation;
