//! Per-session Ed25519 key pair generation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::entities::session::SessionKeyPair;
use crate::errors::{DomainError, DomainResult, TokenError};

/// Generates fresh Ed25519 key pairs for session token signing.
///
/// Each session gets its own pair, so revoking a session invalidates its
/// tokens without touching any shared secret. The private key is exported
/// as PKCS#8 DER and the public key as raw key bytes, both base64-encoded,
/// matching what the token service expects for signing and verification.
pub struct KeyPairGenerator;

impl KeyPairGenerator {
    /// Generate a new key pair from OS randomness.
    ///
    /// # Returns
    /// * `Ok(SessionKeyPair)` - Freshly generated, base64-encoded pair
    /// * `Err(DomainError::Token(TokenError::KeyGenerationFailed))` - The
    ///   OS RNG failed or key serialization failed
    pub fn generate() -> DomainResult<SessionKeyPair> {
        let mut seed = [0u8; 32];
        OsRng.try_fill_bytes(&mut seed).map_err(|e| {
            DomainError::Token(TokenError::KeyGenerationFailed {
                message: format!("OS RNG failure: {}", e),
            })
        })?;

        let signing_key = SigningKey::from_bytes(&seed);
        let verifying_key = signing_key.verifying_key();

        let private_der = signing_key.to_pkcs8_der().map_err(|e| {
            DomainError::Token(TokenError::KeyGenerationFailed {
                message: format!("PKCS#8 encoding failure: {}", e),
            })
        })?;

        Ok(SessionKeyPair {
            public_key: STANDARD.encode(verifying_key.to_bytes()),
            private_key: STANDARD.encode(private_der.as_bytes()),
        })
    }
}
