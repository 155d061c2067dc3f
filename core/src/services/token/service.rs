//! JWT signing and verification against per-session Ed25519 keys

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::session::SessionKeyPair;
use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for creating, signing, and verifying session tokens.
///
/// Tokens are EdDSA-signed JWTs. Signing uses the session's private key
/// (base64 PKCS#8 DER), verification its public key (base64 raw bytes).
/// The service holds no key material of its own.
pub struct TokenService {
    config: TokenServiceConfig,
}

impl TokenService {
    /// Create a token service with the given configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        Self { config }
    }

    /// Create an access/refresh token pair for a shop, signed with the
    /// session's private key.
    ///
    /// Both tokens carry the same identity claims and differ only in
    /// lifetime and `jti`.
    ///
    /// # Arguments
    /// * `user_id` - The shop's unique identifier
    /// * `email` - The shop's email address
    /// * `role` - Role string carried through the token, if any
    /// * `keys` - The session key pair to sign with
    ///
    /// # Returns
    /// * `Ok(TokenPair)` - Signed access and refresh tokens with expiry metadata
    /// * `Err(DomainError)` - Key decoding or signing failure
    pub fn create_token_pair(
        &self,
        user_id: Uuid,
        email: &str,
        role: Option<String>,
        keys: &SessionKeyPair,
    ) -> DomainResult<TokenPair> {
        let access_ttl = Duration::minutes(self.config.access_token_ttl_minutes);
        let refresh_ttl = Duration::days(self.config.refresh_token_ttl_days);

        let access_claims = self.claims_with_ttl(user_id, email, role.clone(), access_ttl);
        let refresh_claims = self.claims_with_ttl(user_id, email, role, refresh_ttl);

        let access_token = self.sign(&access_claims, &keys.private_key)?;
        let refresh_token = self.sign(&refresh_claims, &keys.private_key)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_ttl.num_seconds(),
            refresh_ttl.num_seconds(),
        ))
    }

    /// Sign `claims` into a compact JWT using a base64-encoded PKCS#8
    /// private key.
    pub fn sign(&self, claims: &Claims, private_key: &str) -> DomainResult<String> {
        let der = STANDARD.decode(private_key).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("invalid private key encoding: {}", e),
            })
        })?;
        let encoding_key = EncodingKey::from_ed_der(&der);

        encode(&Header::new(Algorithm::EdDSA), claims, &encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verify a token's signature and registered claims against a
    /// base64-encoded raw public key.
    ///
    /// # Returns
    /// * `Ok(Claims)` - The verified claims
    /// * `Err(DomainError::Token(_))` - Expired, not yet valid, bad
    ///   signature, wrong issuer or audience, or malformed token
    pub fn verify(&self, token: &str, public_key: &str) -> DomainResult<Claims> {
        let raw = STANDARD.decode(public_key).map_err(|e| {
            DomainError::Token(TokenError::KeyLoadError {
                message: format!("invalid public key encoding: {}", e),
            })
        })?;
        let decoding_key = DecodingKey::from_ed_der(&raw);

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_nbf = true;

        let data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            let token_error = match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    TokenError::InvalidClaims
                }
                _ => TokenError::MalformedToken,
            };
            DomainError::Token(token_error)
        })?;

        Ok(data.claims)
    }

    /// SHA-256 hash of a token, hex-encoded.
    ///
    /// Refresh tokens are stored and compared only in this form.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn claims_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        role: Option<String>,
        ttl: Duration,
    ) -> Claims {
        let mut claims = Claims::with_ttl(user_id, email, role, ttl);
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
        claims
    }
}
