//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and `.env` loading

pub mod database;
pub mod environment;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::Environment;
