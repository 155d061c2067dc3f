//! Token service for signing, verifying, and hashing session tokens

mod config;
mod key_pair;
mod service;

pub use config::TokenServiceConfig;
pub use key_pair::KeyPairGenerator;
pub use service::TokenService;

#[cfg(test)]
mod tests;
