//! # TradeHub Core
//!
//! Core business logic and domain layer for the TradeHub backend.
//! This crate contains the session key-store and token-rotation engine:
//! per-shop signing key pairs, signed access/refresh token pairs,
//! refresh-token rotation, and reuse detection. HTTP framing and the
//! product catalog live elsewhere; this crate only exposes ports for its
//! collaborators (account store, password hasher, session store).

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
