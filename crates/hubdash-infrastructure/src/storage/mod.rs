//! Filesystem storage

pub mod fs_document_repo;
pub mod fs_settings_repo;

pub use fs_document_repo::FsDocumentRepository;
pub use fs_settings_repo::FsSettingsRepository;
