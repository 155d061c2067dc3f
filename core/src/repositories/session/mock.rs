//! In-memory implementation of SessionStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::{Session, SessionKeyPair};
use crate::errors::{DomainError, TokenError};

use super::r#trait::SessionStore;

/// In-memory session store for testing.
///
/// `rotate` checks and mutates under a single write guard, so concurrent
/// rotations with the same old hash serialize and exactly one wins.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.user_id, session.clone());
        Ok(session)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&user_id).cloned())
    }

    async fn find_by_used_token(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().find(|s| s.has_used(token_hash)).cloned())
    }

    async fn rotate(
        &self,
        user_id: Uuid,
        old_token_hash: &str,
        new_token_hash: &str,
        new_keys: Option<SessionKeyPair>,
    ) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .get_mut(&user_id)
            .ok_or(DomainError::Token(TokenError::RotationConflict))?;

        if !session.is_current(old_token_hash) {
            return Err(DomainError::Token(TokenError::RotationConflict));
        }

        session.apply_rotation(new_token_hash.to_string(), new_keys);
        Ok(session.clone())
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(&user_id).is_some())
    }
}
