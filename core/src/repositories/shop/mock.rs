//! In-memory implementation of ShopRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::shop::Shop;
use crate::errors::{AuthError, DomainError};

use super::r#trait::ShopRepository;

/// In-memory shop repository for testing
pub struct InMemoryShopRepository {
    shops: Arc<RwLock<HashMap<Uuid, Shop>>>,
}

impl InMemoryShopRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            shops: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryShopRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShopRepository for InMemoryShopRepository {
    async fn create(&self, shop: Shop) -> Result<Shop, DomainError> {
        let mut shops = self.shops.write().await;
        if shops.values().any(|s| s.email == shop.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }
        shops.insert(shop.id, shop.clone());
        Ok(shop)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Shop>, DomainError> {
        let shops = self.shops.read().await;
        Ok(shops.values().find(|s| s.email == email).cloned())
    }
}
