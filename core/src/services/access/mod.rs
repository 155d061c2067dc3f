//! Access service for signup, login, and refresh token rotation

mod config;
mod password;
mod service;

pub use config::AccessServiceConfig;
pub use password::PasswordHasher;
pub use service::AccessService;
