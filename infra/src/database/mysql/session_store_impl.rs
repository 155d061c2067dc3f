//! MySQL implementation of the SessionStore trait.
//!
//! Persists session key and token state across two tables: `sessions`
//! holds the one live session per shop, `session_used_tokens` holds the
//! hashes of refresh tokens that were rotated away. Rotation commits
//! through a conditional UPDATE so concurrent attempts with the same old
//! hash cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use th_core::domain::entities::session::{Session, SessionKeyPair};
use th_core::errors::{DomainError, TokenError};
use th_core::repositories::SessionStore;

/// MySQL implementation of SessionStore
pub struct MySqlSessionStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionStore {
    /// Create a new MySQL session store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a `sessions` row plus its used-token hashes into a Session
    fn row_to_session(
        row: &sqlx::mysql::MySqlRow,
        used_token_hashes: Vec<String>,
    ) -> Result<Session, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(|e| {
            DomainError::Infrastructure {
                message: format!("Failed to get user_id: {}", e),
            }
        })?;

        Ok(Session {
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Infrastructure {
                message: format!("Invalid session UUID: {}", e),
            })?,
            public_key: row
                .try_get("public_key")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get public_key: {}", e),
                })?,
            private_key: row
                .try_get("private_key")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get private_key: {}", e),
                })?,
            current_token_hash: row.try_get("current_token_hash").map_err(|e| {
                DomainError::Infrastructure {
                    message: format!("Failed to get current_token_hash: {}", e),
                }
            })?,
            used_token_hashes,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    /// Load the used-token hashes for a shop, oldest first
    async fn load_used_hashes(&self, user_id: &str) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT token_hash FROM session_used_tokens WHERE user_id = ? ORDER BY rotated_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to load used token hashes: {}", e),
        })?;

        rows.iter()
            .map(|row| {
                row.try_get("token_hash")
                    .map_err(|e| DomainError::Infrastructure {
                        message: format!("Failed to get token_hash: {}", e),
                    })
            })
            .collect()
    }

    /// Load the full session for `user_id`, if any
    async fn load_session(&self, user_id: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, public_key, private_key, current_token_hash, created_at, updated_at
            FROM sessions
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to find session: {}", e),
        })?;

        match row {
            Some(row) => {
                let used = self.load_used_hashes(user_id).await?;
                Ok(Some(Self::row_to_session(&row, used)?))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SessionStore for MySqlSessionStore {
    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to begin transaction: {}", e),
            })?;

        let user_id = session.user_id.to_string();

        // A replaced session starts with a clean history
        sqlx::query("DELETE FROM session_used_tokens WHERE user_id = ?")
            .bind(&user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to clear used token history: {}", e),
            })?;

        let query = r#"
            INSERT INTO sessions (
                user_id, public_key, private_key, current_token_hash, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                public_key = VALUES(public_key),
                private_key = VALUES(private_key),
                current_token_hash = VALUES(current_token_hash),
                created_at = VALUES(created_at),
                updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(&user_id)
            .bind(&session.public_key)
            .bind(&session.private_key)
            .bind(&session.current_token_hash)
            .bind(session.created_at)
            .bind(session.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to save session: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to commit session creation: {}", e),
        })?;

        Ok(session)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Session>, DomainError> {
        self.load_session(&user_id.to_string()).await
    }

    async fn find_by_used_token(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            "SELECT user_id FROM session_used_tokens WHERE token_hash = ? LIMIT 1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to look up used token: {}", e),
        })?;

        match row {
            Some(row) => {
                let user_id: String =
                    row.try_get("user_id")
                        .map_err(|e| DomainError::Infrastructure {
                            message: format!("Failed to get user_id: {}", e),
                        })?;
                self.load_session(&user_id).await
            }
            None => Ok(None),
        }
    }

    async fn rotate(
        &self,
        user_id: Uuid,
        old_token_hash: &str,
        new_token_hash: &str,
        new_keys: Option<SessionKeyPair>,
    ) -> Result<Session, DomainError> {
        let user_id_str = user_id.to_string();
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to begin transaction: {}", e),
            })?;

        // The WHERE clause on the old hash is the compare-and-swap: a
        // concurrent rotation that already committed leaves zero rows here.
        let result = match &new_keys {
            Some(keys) => sqlx::query(
                r#"
                UPDATE sessions
                SET current_token_hash = ?, public_key = ?, private_key = ?, updated_at = ?
                WHERE user_id = ? AND current_token_hash = ?
                "#,
            )
            .bind(new_token_hash)
            .bind(&keys.public_key)
            .bind(&keys.private_key)
            .bind(now)
            .bind(&user_id_str)
            .bind(old_token_hash),
            None => sqlx::query(
                r#"
                UPDATE sessions
                SET current_token_hash = ?, updated_at = ?
                WHERE user_id = ? AND current_token_hash = ?
                "#,
            )
            .bind(new_token_hash)
            .bind(now)
            .bind(&user_id_str)
            .bind(old_token_hash),
        }
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to rotate session token: {}", e),
        })?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to roll back rotation: {}", e),
                })?;
            return Err(DomainError::Token(TokenError::RotationConflict));
        }

        sqlx::query(
            "INSERT INTO session_used_tokens (user_id, token_hash, rotated_at) VALUES (?, ?, ?)",
        )
        .bind(&user_id_str)
        .bind(old_token_hash)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to record used token: {}", e),
        })?;

        tx.commit().await.map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to commit rotation: {}", e),
        })?;

        self.load_session(&user_id_str)
            .await?
            .ok_or(DomainError::Infrastructure {
                message: "Session disappeared after rotation".to_string(),
            })
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let user_id_str = user_id.to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to begin transaction: {}", e),
            })?;

        sqlx::query("DELETE FROM session_used_tokens WHERE user_id = ?")
            .bind(&user_id_str)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to delete used token history: {}", e),
            })?;

        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(&user_id_str)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to delete session: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to commit session deletion: {}", e),
        })?;

        Ok(result.rows_affected() > 0)
    }
}
