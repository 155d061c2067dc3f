//! Tests for the in-memory session store

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::session::{Session, SessionKeyPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::session::mock::InMemorySessionStore;
use crate::repositories::session::SessionStore;

fn key_pair(tag: &str) -> SessionKeyPair {
    SessionKeyPair {
        public_key: format!("pub-{}", tag),
        private_key: format!("priv-{}", tag),
    }
}

fn session(user_id: Uuid, hash: &str) -> Session {
    Session::new(user_id, key_pair("a"), hash.to_string())
}

#[tokio::test]
async fn test_create_and_find() {
    let store = InMemorySessionStore::new();
    let user_id = Uuid::new_v4();

    store.create(session(user_id, "hash-1")).await.unwrap();

    let found = store.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(found.current_token_hash, "hash-1");
    assert!(store
        .find_by_user_id(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_replaces_and_clears_history() {
    let store = InMemorySessionStore::new();
    let user_id = Uuid::new_v4();

    store.create(session(user_id, "hash-1")).await.unwrap();
    store
        .rotate(user_id, "hash-1", "hash-2", None)
        .await
        .unwrap();

    // Fresh login: prior history must be gone
    store.create(session(user_id, "hash-3")).await.unwrap();

    let found = store.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(found.current_token_hash, "hash-3");
    assert!(found.used_token_hashes.is_empty());
    assert!(store.find_by_used_token("hash-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rotate_moves_hash_into_history() {
    let store = InMemorySessionStore::new();
    let user_id = Uuid::new_v4();
    store.create(session(user_id, "hash-1")).await.unwrap();

    let updated = store
        .rotate(user_id, "hash-1", "hash-2", None)
        .await
        .unwrap();

    assert_eq!(updated.current_token_hash, "hash-2");
    assert!(updated.has_used("hash-1"));

    let by_used = store
        .find_by_used_token("hash-1")
        .await
        .unwrap()
        .expect("rotated hash should be findable");
    assert_eq!(by_used.user_id, user_id);
}

#[tokio::test]
async fn test_rotate_precondition_failure() {
    let store = InMemorySessionStore::new();
    let user_id = Uuid::new_v4();
    store.create(session(user_id, "hash-1")).await.unwrap();

    let result = store.rotate(user_id, "stale-hash", "hash-2", None).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::RotationConflict)
    ));

    // Session unchanged
    let found = store.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(found.current_token_hash, "hash-1");
}

#[tokio::test]
async fn test_rotate_missing_session_is_conflict() {
    let store = InMemorySessionStore::new();
    let result = store
        .rotate(Uuid::new_v4(), "hash-1", "hash-2", None)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::RotationConflict)
    ));
}

#[tokio::test]
async fn test_rotate_with_key_replacement() {
    let store = InMemorySessionStore::new();
    let user_id = Uuid::new_v4();
    store.create(session(user_id, "hash-1")).await.unwrap();

    let updated = store
        .rotate(user_id, "hash-1", "hash-2", Some(key_pair("b")))
        .await
        .unwrap();

    assert_eq!(updated.public_key, "pub-b");
    assert_eq!(updated.private_key, "priv-b");
}

#[tokio::test]
async fn test_find_by_used_token_across_users() {
    let store = InMemorySessionStore::new();
    let victim = Uuid::new_v4();
    let other = Uuid::new_v4();
    store.create(session(victim, "hash-v1")).await.unwrap();
    store.create(session(other, "hash-o1")).await.unwrap();
    store
        .rotate(victim, "hash-v1", "hash-v2", None)
        .await
        .unwrap();

    // Lookup is independent of which user presents the hash
    let found = store.find_by_used_token("hash-v1").await.unwrap().unwrap();
    assert_eq!(found.user_id, victim);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = InMemorySessionStore::new();
    let user_id = Uuid::new_v4();
    store.create(session(user_id, "hash-1")).await.unwrap();

    assert!(store.delete(user_id).await.unwrap());
    assert!(!store.delete(user_id).await.unwrap());
    assert!(store.find_by_user_id(user_id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotation_single_winner() {
    let store = Arc::new(InMemorySessionStore::new());
    let user_id = Uuid::new_v4();
    store.create(session(user_id, "hash-1")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        let new_hash = format!("hash-new-{}", i);
        handles.push(tokio::spawn(async move {
            store.rotate(user_id, "hash-1", &new_hash, None).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1, "exactly one concurrent rotation may win");
}
