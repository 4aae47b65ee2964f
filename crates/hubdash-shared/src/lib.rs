//! # Hubdash Shared
//!
//! Configuration, telemetry, and constants shared by every dashboard crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use self::config::{AppConfig, Environment};
pub use error::AppError;
