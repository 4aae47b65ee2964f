//! Site settings shown alongside the navigation menu

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{SiteSettings, SiteSettingsPatch};
use crate::error::DomainError;
use crate::repositories::SettingsRepository;

pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Stored settings, or the defaults when none are saved or the store fails.
    pub async fn current(&self) -> SiteSettings {
        match self.repo.load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => SiteSettings::default(),
            Err(e) => {
                warn!("Falling back to default site settings: {}", e);
                SiteSettings::default()
            }
        }
    }

    pub async fn update(&self, patch: SiteSettingsPatch) -> Result<SiteSettings, DomainError> {
        let merged = self.current().await.merged(patch)?;
        self.repo.save(&merged).await?;
        info!(
            "Site settings saved (proxy domain {}, theme {})",
            merged.proxy_domain, merged.theme
        );
        Ok(merged)
    }
}
