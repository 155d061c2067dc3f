//! Shop entity representing a registered merchant account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to a shop account.
///
/// Carried through token claims; authorization decisions based on it
/// belong to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopRole {
    /// A regular merchant account
    Shop,
    /// Content writer
    Writer,
    /// Content editor
    Editor,
    /// Administrator
    Admin,
}

impl ShopRole {
    /// Canonical string form used in token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopRole::Shop => "shop",
            ShopRole::Writer => "writer",
            ShopRole::Editor => "editor",
            ShopRole::Admin => "admin",
        }
    }
}

/// Shop entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Unique identifier for the shop
    pub id: Uuid,

    /// Display name of the shop
    pub name: String,

    /// Normalized email address, unique per shop
    pub email: String,

    /// Password hash produced by the hasher port; never a plain password
    pub password_hash: String,

    /// Role attached to the account
    pub role: ShopRole,

    /// Timestamp when the shop was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the shop was last updated
    pub updated_at: DateTime<Utc>,
}

impl Shop {
    /// Creates a new Shop with the default `shop` role
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role: ShopRole::Shop,
            created_at: now,
            updated_at: now,
        }
    }
}
