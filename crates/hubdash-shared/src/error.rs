//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),

    #[error("Invalid value for {name}: {value}")]
    InvalidVariable { name: &'static str, value: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}
