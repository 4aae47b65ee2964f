use std::sync::Arc;

use hubdash_core::probes::{NetworkProbe, SystemProbe};
use hubdash_core::repositories::{DocumentRepository, MenuItemRepository, SettingsRepository};
use hubdash_core::services::{
    DocumentationService, HealthService, MenuService, NetworkTestService, SettingsService,
};
use hubdash_security::{SessionManager, UserDirectory};
use hubdash_shared::constants::SESSION_TTL_SECONDS;
use hubdash_shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub menu: Arc<MenuService>,
    pub settings: Arc<SettingsService>,
    pub documentation: Arc<DocumentationService>,
    pub health: Arc<HealthService>,
    pub network: Arc<NetworkTestService>,
    pub sessions: Arc<SessionManager>,
    pub users: Arc<UserDirectory>,
}

/// Storage and probe adapters the services are built on.
pub struct Adapters {
    pub menu_repo: Arc<dyn MenuItemRepository>,
    pub document_repo: Arc<dyn DocumentRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub system_probe: Arc<dyn SystemProbe>,
    pub network_probe: Arc<dyn NetworkProbe>,
}

impl AppState {
    pub fn new(config: AppConfig, adapters: Adapters, users: UserDirectory) -> Self {
        let health = HealthService::new(
            adapters.system_probe,
            env!("CARGO_PKG_VERSION"),
            config.env.as_str(),
        );
        let sessions = SessionManager::new(&config.session_secret, SESSION_TTL_SECONDS);

        Self {
            menu: Arc::new(MenuService::new(adapters.menu_repo)),
            settings: Arc::new(SettingsService::new(adapters.settings_repo)),
            documentation: Arc::new(DocumentationService::new(adapters.document_repo)),
            health: Arc::new(health),
            network: Arc::new(NetworkTestService::new(adapters.network_probe)),
            sessions: Arc::new(sessions),
            users: Arc::new(users),
            config: Arc::new(config),
        }
    }
}
