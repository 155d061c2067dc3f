//! Domain entities representing core business objects.

pub mod session;
pub mod shop;
pub mod token;

// Re-export commonly used types
pub use session::{Session, SessionKeyPair};
pub use shop::{Shop, ShopRole};
pub use token::{
    Claims, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
