//! Session store port.
//!
//! Holds conversation sessions between turns. Each session sits behind its
//! own async mutex so turns of one session are serialized while other
//! sessions proceed independently.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{DomainError, SessionId};

/// Shared handle to a stored session.
pub type SessionHandle = Arc<Mutex<ConversationSession>>;

/// Port for keeping sessions between turns.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session.
    ///
    /// # Errors
    ///
    /// - `StoreError` if a session with the same id already exists
    async fn insert(&self, session: ConversationSession) -> Result<SessionHandle, DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, DomainError>;

    /// Remove a session, returning whether it existed.
    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Number of stored sessions.
    async fn len(&self) -> Result<usize, DomainError>;
}
