//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(Uuid),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document is not published: {0}")]
    DocumentNotPublished(String),

    #[error("Invalid domain format: {0}")]
    InvalidDomain(String),

    #[error("Invalid test type: {0}")]
    InvalidTestKind(String),

    #[error("Network test timed out")]
    ProbeTimeout,

    #[error("Network test failed: {0}")]
    ProbeFailed(String),

    #[error("System information unavailable: {0}")]
    SystemInfoUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
