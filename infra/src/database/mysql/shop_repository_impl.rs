//! MySQL implementation of the ShopRepository trait.
//!
//! Email uniqueness is enforced by a unique index on `shops.email`; a
//! duplicate-key failure on insert surfaces as the registration conflict
//! the domain expects.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use th_core::domain::entities::shop::{Shop, ShopRole};
use th_core::errors::{AuthError, DomainError};
use th_core::repositories::ShopRepository;

/// MySQL implementation of ShopRepository
pub struct MySqlShopRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlShopRepository {
    /// Create a new MySQL shop repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Shop entity
    fn row_to_shop(row: &sqlx::mysql::MySqlRow) -> Result<Shop, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to get id: {}", e),
        })?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to get role: {}", e),
            })?;

        Ok(Shop {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Infrastructure {
                message: format!("Invalid shop UUID: {}", e),
            })?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get name: {}", e),
                })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get email: {}", e),
                })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Infrastructure {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            role: Self::parse_role(&role)?,
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

    fn parse_role(role: &str) -> Result<ShopRole, DomainError> {
        match role {
            "shop" => Ok(ShopRole::Shop),
            "writer" => Ok(ShopRole::Writer),
            "editor" => Ok(ShopRole::Editor),
            "admin" => Ok(ShopRole::Admin),
            other => Err(DomainError::Infrastructure {
                message: format!("Unknown shop role: {}", other),
            }),
        }
    }
}

#[async_trait]
impl ShopRepository for MySqlShopRepository {
    async fn create(&self, shop: Shop) -> Result<Shop, DomainError> {
        let query = r#"
            INSERT INTO shops (
                id, name, email, password_hash, role, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(shop.id.to_string())
            .bind(&shop.name)
            .bind(&shop.email)
            .bind(&shop.password_hash)
            .bind(shop.role.as_str())
            .bind(shop.created_at)
            .bind(shop.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db_err) if db_err.is_unique_violation() => {
                    DomainError::Auth(AuthError::EmailAlreadyRegistered)
                }
                _ => DomainError::Infrastructure {
                    message: format!("Failed to create shop: {}", e),
                },
            })?;

        Ok(shop)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Shop>, DomainError> {
        let query = r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM shops
            WHERE email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Infrastructure {
                message: format!("Failed to find shop by email: {}", e),
            })?;

        row.map(|row| Self::row_to_shop(&row)).transpose()
    }
}
