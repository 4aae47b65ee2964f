//! # Hubdash Infrastructure
//!
//! Storage and probe implementations (adapters).

pub mod database;
pub mod probes;
pub mod storage;

pub use database::{create_pool, run_migrations, InMemoryMenuItemRepository, PgMenuItemRepository};
pub use probes::{CommandProbe, SysinfoProbe};
pub use storage::{FsDocumentRepository, FsSettingsRepository};
