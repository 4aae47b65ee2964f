//! # Hubdash Core
//!
//! Domain entities, services, repository traits, and probe traits for the
//! dashboard.

pub mod domain;
pub mod error;
pub mod probes;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
