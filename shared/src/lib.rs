//! Shared utilities and configuration for TradeHub server
//!
//! This crate provides common functionality used across the server modules:
//! - Environment-driven configuration types
//! - Input validation utilities

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, Environment};
pub use utils::validation;
