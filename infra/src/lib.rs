//! # Infrastructure Layer
//!
//! Concrete implementations behind the domain's ports:
//! - **Database**: MySQL session store and shop repository using SQLx
//! - **Security**: bcrypt password hashing

pub mod database;
pub mod security;

pub use database::{DatabasePool, MySqlSessionStore, MySqlShopRepository};
pub use security::BcryptPasswordHasher;
