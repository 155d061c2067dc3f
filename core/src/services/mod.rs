//! Business logic services

pub mod access;
pub mod token;

pub use access::{AccessService, AccessServiceConfig, PasswordHasher};
pub use token::{KeyPairGenerator, TokenService, TokenServiceConfig};
