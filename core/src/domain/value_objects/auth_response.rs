//! Authentication response value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::shop::Shop;
use crate::domain::entities::token::TokenPair;

/// Public projection of a shop account, safe to return to clients.
///
/// Deliberately excludes the password hash and role internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSummary {
    /// Shop id
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl From<&Shop> for ShopSummary {
    fn from(shop: &Shop) -> Self {
        Self {
            id: shop.id,
            name: shop.name.clone(),
            email: shop.email.clone(),
        }
    }
}

/// Response returned after successful signup or login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Account summary for the authenticated shop
    pub shop: ShopSummary,

    /// Freshly issued access/refresh token pair
    pub tokens: TokenPair,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(shop: &Shop, tokens: TokenPair) -> Self {
        Self {
            shop: ShopSummary::from(shop),
            tokens,
        }
    }
}
