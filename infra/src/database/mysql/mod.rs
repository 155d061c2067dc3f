//! MySQL repository implementations

pub mod session_store_impl;
pub mod shop_repository_impl;

pub use session_store_impl::MySqlSessionStore;
pub use shop_repository_impl::MySqlShopRepository;
