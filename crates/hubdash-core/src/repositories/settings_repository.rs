//! Site settings repository trait (port)

use async_trait::async_trait;

use crate::domain::SiteSettings;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<SiteSettings>, DomainError>;
    async fn save(&self, settings: &SiteSettings) -> Result<(), DomainError>;
}
