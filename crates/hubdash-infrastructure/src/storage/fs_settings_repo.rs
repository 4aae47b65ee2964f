//! Site settings as a pretty-printed JSON file

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, warn};

use hubdash_core::domain::SiteSettings;
use hubdash_core::error::DomainError;
use hubdash_core::repositories::SettingsRepository;

pub struct FsSettingsRepository {
    path: PathBuf,
}

impl FsSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsRepository for FsSettingsRepository {
    async fn load(&self) -> Result<Option<SiteSettings>, DomainError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::StorageError(e.to_string())),
        };
        match serde_json::from_slice(&raw) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                warn!("Ignoring unreadable site settings {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, settings: &SiteSettings) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create settings directory {:?}: {}", parent, e);
                DomainError::StorageError(e.to_string())
            })?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        fs::write(&self.path, json).await.map_err(|e| {
            error!("Failed to write site settings {:?}: {}", self.path, e);
            DomainError::StorageError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let repo = FsSettingsRepository::new(dir.path().join("config.json"));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = FsSettingsRepository::new(dir.path().join("data/config.json"));
        let settings = SiteSettings {
            theme: "dark".to_string(),
            ..SiteSettings::default()
        };

        repo.save(&settings).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(settings));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = FsSettingsRepository::new(path);
        assert!(repo.load().await.unwrap().is_none());
    }
}
