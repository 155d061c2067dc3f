//! Tests for token signing, verification, and hashing

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{KeyPairGenerator, TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::default())
}

#[test]
fn test_create_and_verify_token_pair() {
    let service = service();
    let keys = KeyPairGenerator::generate().unwrap();
    let user_id = Uuid::new_v4();

    let pair = service
        .create_token_pair(user_id, "shop@example.com", Some("shop".to_string()), &keys)
        .unwrap();

    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);

    let access = service.verify(&pair.access_token, &keys.public_key).unwrap();
    assert_eq!(access.user_id().unwrap(), user_id);
    assert_eq!(access.email, "shop@example.com");
    assert_eq!(access.role.as_deref(), Some("shop"));

    let refresh = service
        .verify(&pair.refresh_token, &keys.public_key)
        .unwrap();
    assert_eq!(refresh.user_id().unwrap(), user_id);
    assert_ne!(access.jti, refresh.jti);
}

#[test]
fn test_verify_rejects_wrong_key() {
    let service = service();
    let keys = KeyPairGenerator::generate().unwrap();
    let other_keys = KeyPairGenerator::generate().unwrap();

    let pair = service
        .create_token_pair(Uuid::new_v4(), "shop@example.com", None, &keys)
        .unwrap();

    let result = service.verify(&pair.access_token, &other_keys.public_key);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_verify_rejects_tampered_token() {
    let service = service();
    let keys = KeyPairGenerator::generate().unwrap();

    let pair = service
        .create_token_pair(Uuid::new_v4(), "shop@example.com", None, &keys)
        .unwrap();

    // Corrupt the payload segment
    let mut parts: Vec<String> = pair
        .access_token
        .split('.')
        .map(|s| s.to_string())
        .collect();
    parts[1] = format!("{}AA", parts[1]);
    let tampered = parts.join(".");

    assert!(service.verify(&tampered, &keys.public_key).is_err());
}

#[test]
fn test_verify_rejects_expired_token() {
    let service = service();
    let keys = KeyPairGenerator::generate().unwrap();

    let mut claims = Claims::with_ttl(Uuid::new_v4(), "shop@example.com", None, Duration::minutes(15));
    let past = Utc::now() - Duration::minutes(30);
    claims.iat = past.timestamp();
    claims.nbf = past.timestamp();
    claims.exp = (past + Duration::minutes(15)).timestamp();

    let token = service.sign(&claims, &keys.private_key).unwrap();
    let result = service.verify(&token, &keys.public_key);

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenExpired)
    ));
}

#[test]
fn test_verify_rejects_wrong_issuer() {
    let keys = KeyPairGenerator::generate().unwrap();
    let signer = TokenService::new(TokenServiceConfig {
        issuer: "someone-else".to_string(),
        ..TokenServiceConfig::default()
    });
    let verifier = service();

    let pair = signer
        .create_token_pair(Uuid::new_v4(), "shop@example.com", None, &keys)
        .unwrap();

    let result = verifier.verify(&pair.access_token, &keys.public_key);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidClaims)
    ));
}

#[test]
fn test_verify_rejects_garbage() {
    let service = service();
    let keys = KeyPairGenerator::generate().unwrap();

    let result = service.verify("not-a-jwt", &keys.public_key);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::MalformedToken)
    ));
}

#[test]
fn test_verify_rejects_bad_key_encoding() {
    let service = service();
    let result = service.verify("whatever", "!!not base64!!");
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::KeyLoadError { .. })
    ));
}

#[test]
fn test_hash_token_is_deterministic_hex() {
    let a = TokenService::hash_token("some-refresh-token");
    let b = TokenService::hash_token("some-refresh-token");
    let c = TokenService::hash_token("another-token");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
}
