//! In-Memory Session Store Adapter
//!
//! Keeps every session behind its own mutex inside a shared map. The map lock
//! is only held long enough to look up or insert a handle.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::{SessionHandle, SessionStore};

/// In-memory storage for conversation sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: ConversationSession) -> Result<SessionHandle, DomainError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(DomainError::new(
                ErrorCode::StoreError,
                format!("Session {} already exists", id),
            ));
        }
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}
