//! Document repository trait (port)

use async_trait::async_trait;

use crate::domain::Document;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Document>, DomainError>;
    async fn find(&self, id: &str) -> Result<Option<Document>, DomainError>;
    /// Create or replace.
    async fn save(&self, document: &Document) -> Result<(), DomainError>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
