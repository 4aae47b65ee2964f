//! Repository traits (ports)

pub mod document_repository;
pub mod menu_item_repository;
pub mod settings_repository;

pub use document_repository::DocumentRepository;
pub use menu_item_repository::MenuItemRepository;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
