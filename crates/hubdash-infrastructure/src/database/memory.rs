//! In-memory menu store, used when no `DATABASE_URL` is configured

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use hubdash_core::domain::MenuItem;
use hubdash_core::error::DomainError;
use hubdash_core::repositories::MenuItemRepository;

#[derive(Default)]
pub struct InMemoryMenuItemRepository {
    items: RwLock<Vec<MenuItem>>,
}

impl InMemoryMenuItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.items.read().len() as u64)
    }

    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let mut items = self.items.read().clone();
        items.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
        Ok(items)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.items.read().iter().find(|item| item.id == *id).cloned())
    }

    async fn insert_many(&self, items: &[MenuItem]) -> Result<u64, DomainError> {
        self.items.write().extend_from_slice(items);
        Ok(items.len() as u64)
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        self.items.write().push(item.clone());
        Ok(item.clone())
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut items = self.items.write();
        let slot = items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or(DomainError::MenuItemNotFound(item.id))?;
        *slot = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id != *id);
        Ok(items.len() < before)
    }
}
