//! bcrypt implementation of the PasswordHasher port

use bcrypt::{hash, verify, DEFAULT_COST};

use th_core::errors::DomainError;
use th_core::services::access::PasswordHasher;

/// bcrypt password hasher
pub struct BcryptPasswordHasher {
    /// Work factor for hashing; verification reads the cost from the hash
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the default bcrypt cost
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a hasher with an explicit cost
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash(password, self.cost).map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        verify(password, hash).map_err(|e| DomainError::Infrastructure {
            message: format!("Failed to verify password: {}", e),
        })
    }
}
