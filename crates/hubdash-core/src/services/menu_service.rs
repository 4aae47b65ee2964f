// ============================================================================
// Hubdash Core - Menu Service
// File: crates/hubdash-core/src/services/menu_service.rs
// ============================================================================
//! Menu seeding, administration, and the public menu configuration

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{MenuConfig, MenuItem, MenuItemPatch, NewMenuItem};
use crate::error::DomainError;
use crate::repositories::MenuItemRepository;

/// The two entries inserted into an empty store.
pub fn default_menu_items() -> Result<Vec<MenuItem>, DomainError> {
    Ok(vec![
        MenuItem::new("Home", "/")?.with_icon("fa-home").with_order(1),
        MenuItem::new("Docs", "/docs")?.with_icon("fa-book").with_order(2),
    ])
}

pub struct MenuService {
    repo: Arc<dyn MenuItemRepository>,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuItemRepository>) -> Self {
        Self { repo }
    }

    /// Insert the default entries if and only if the store is empty.
    ///
    /// Returns the number of inserted rows. Existing data is never touched.
    pub async fn seed_defaults(&self) -> Result<u64, DomainError> {
        let count = self.repo.count().await?;
        if count > 0 {
            debug!("Menu store already holds {} items, skipping seed", count);
            return Ok(0);
        }

        let defaults = default_menu_items()?;
        let inserted = self.repo.insert_many(&defaults).await?;
        info!("Default menu items initialized ({} rows)", inserted);
        Ok(inserted)
    }

    pub async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.repo.list().await
    }

    /// Enabled entries in display order, as served by `/api/config`.
    pub async fn menu_config(&self) -> Result<MenuConfig, DomainError> {
        let menu_items = self
            .repo
            .list()
            .await?
            .iter()
            .filter(|item| item.enabled)
            .map(MenuItem::to_entry)
            .collect();
        Ok(MenuConfig { menu_items })
    }

    pub async fn create(&self, input: NewMenuItem) -> Result<MenuItem, DomainError> {
        let item = input.into_menu_item()?;
        let created = self.repo.create(&item).await?;
        info!("Menu item created: {} -> {}", created.text, created.link);
        Ok(created)
    }

    pub async fn update(&self, id: &Uuid, patch: MenuItemPatch) -> Result<MenuItem, DomainError> {
        let mut item = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuItemNotFound(*id))?;
        item.apply(patch)?;
        self.repo.update(&item).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::MenuItemNotFound(*id));
        }
        info!("Menu item deleted: {}", id);
        Ok(())
    }
}
