//! Session store trait defining the interface for session persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::session::{Session, SessionKeyPair};
use crate::errors::DomainError;

/// Repository trait for Session entity persistence.
///
/// Implementations must guarantee at most one live session per shop and
/// an atomic `rotate`: of two concurrent rotation attempts presenting the
/// same old token hash, exactly one may succeed.
///
/// # Security Considerations
/// - Refresh tokens are stored as SHA-256 hashes, never in the clear
/// - The used-token history exists solely for reuse detection
/// - Private key material is written at creation and only replaced wholesale
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert or replace the session for `session.user_id`.
    ///
    /// Replacing an existing session discards its used-token history, so
    /// a fresh login always starts with a clean state.
    ///
    /// # Returns
    /// * `Ok(Session)` - The persisted session
    /// * `Err(DomainError)` - Store failure
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Find the session owned by `user_id`.
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - Session found
    /// * `Ok(None)` - No live session for this shop
    /// * `Err(DomainError)` - Store failure
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Session>, DomainError>;

    /// Find the session whose used-token history contains `token_hash`,
    /// regardless of owner.
    ///
    /// Used for reuse detection even when the caller's claimed identity
    /// is attacker-controlled.
    async fn find_by_used_token(&self, token_hash: &str) -> Result<Option<Session>, DomainError>;

    /// Atomically rotate the refresh token for `user_id`.
    ///
    /// Succeeds iff `old_token_hash` equals the stored current hash at
    /// commit time; the old hash then moves into the used history and
    /// `new_token_hash` becomes current. When `new_keys` is given, the
    /// session's key pair is replaced wholesale in the same operation.
    ///
    /// # Returns
    /// * `Ok(Session)` - The updated session
    /// * `Err(DomainError::Token(TokenError::RotationConflict))` - The
    ///   precondition did not hold (concurrent rotation won, or the hash
    ///   was never current)
    /// * `Err(DomainError)` - Store failure
    async fn rotate(
        &self,
        user_id: Uuid,
        old_token_hash: &str,
        new_token_hash: &str,
        new_keys: Option<SessionKeyPair>,
    ) -> Result<Session, DomainError>;

    /// Delete the session for `user_id`; idempotent.
    ///
    /// # Returns
    /// * `Ok(true)` - A session existed and was removed
    /// * `Ok(false)` - Nothing to remove
    /// * `Err(DomainError)` - Store failure
    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
