//! Menu item repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::MenuItem;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn count(&self) -> Result<u64, DomainError>;
    /// All items ordered by `order`, then creation time.
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError>;
    async fn insert_many(&self, items: &[MenuItem]) -> Result<u64, DomainError>;
    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
