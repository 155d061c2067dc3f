//! Password hashing port

use crate::errors::DomainError;

/// Port for password hashing and verification.
///
/// Implementations live in the infrastructure layer; the domain only
/// sees opaque hash strings.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a plain password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
