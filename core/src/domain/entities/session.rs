//! Session entity binding a shop to its signing keys and refresh token state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-session signing key pair as opaque, base64-encoded byte strings.
///
/// The private key is written once at session creation and only ever
/// replaced wholesale; it must not leave sign/verify operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKeyPair {
    /// Verification key (raw Ed25519 public key bytes, base64)
    pub public_key: String,

    /// Signing key (PKCS#8 DER, base64)
    pub private_key: String,
}

/// Server-side session record, at most one per shop.
///
/// Holds the current refresh token hash plus the append-only history of
/// hashes that were rotated away. Tokens themselves are never stored in
/// the clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Owning shop id - foreign reference, not owned by this record
    pub user_id: Uuid,

    /// Verification key for this session's tokens
    pub public_key: String,

    /// Signing key for this session's tokens
    pub private_key: String,

    /// SHA-256 hash of the single refresh token currently valid for rotation
    pub current_token_hash: String,

    /// Hashes of refresh tokens that were valid in the past, kept solely
    /// for reuse detection; never reissued
    pub used_token_hashes: Vec<String>,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last rotation (or creation)
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh session with an empty used-token history
    pub fn new(user_id: Uuid, key_pair: SessionKeyPair, current_token_hash: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            public_key: key_pair.public_key,
            private_key: key_pair.private_key,
            current_token_hash,
            used_token_hashes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether `token_hash` is the currently valid refresh token
    pub fn is_current(&self, token_hash: &str) -> bool {
        self.current_token_hash == token_hash
    }

    /// Checks whether `token_hash` was already rotated away
    pub fn has_used(&self, token_hash: &str) -> bool {
        self.used_token_hashes.iter().any(|h| h == token_hash)
    }

    /// Applies a rotation in place: the current hash moves into the used
    /// history and `new_token_hash` becomes current. When `new_keys` is
    /// given the key pair is replaced wholesale.
    pub fn apply_rotation(&mut self, new_token_hash: String, new_keys: Option<SessionKeyPair>) {
        let old = std::mem::replace(&mut self.current_token_hash, new_token_hash);
        self.used_token_hashes.push(old);
        if let Some(keys) = new_keys {
            self.public_key = keys.public_key;
            self.private_key = keys.private_key;
        }
        self.updated_at = Utc::now();
    }

    /// Borrow the key pair for sign/verify operations
    pub fn key_pair(&self) -> SessionKeyPair {
        SessionKeyPair {
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
        }
    }
}
