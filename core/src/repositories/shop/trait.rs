//! Shop repository trait defining the interface for shop account persistence.

use async_trait::async_trait;

use crate::domain::entities::shop::Shop;
use crate::errors::DomainError;

/// Repository trait for Shop entity persistence.
///
/// Email addresses are unique across shops; implementations enforce this
/// at the storage level.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Persist a new shop account.
    ///
    /// # Returns
    /// * `Ok(Shop)` - The persisted shop
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - The
    ///   email is already taken
    /// * `Err(DomainError)` - Store failure
    async fn create(&self, shop: Shop) -> Result<Shop, DomainError>;

    /// Find a shop by its normalized email address.
    ///
    /// # Returns
    /// * `Ok(Some(Shop))` - Shop found
    /// * `Ok(None)` - No shop with this email
    /// * `Err(DomainError)` - Store failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Shop>, DomainError>;
}
