//! Database module (menu item stores)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use memory::InMemoryMenuItemRepository;
pub use postgres::PgMenuItemRepository;
