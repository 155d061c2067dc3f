//! Repository ports for persistence collaborators.

pub mod session;
pub mod shop;

pub use session::SessionStore;
pub use shop::ShopRepository;

#[cfg(test)]
pub use session::InMemorySessionStore;
#[cfg(test)]
pub use shop::InMemoryShopRepository;
