//! Domain services (business logic)

pub mod documentation_service;
pub mod health_service;
pub mod menu_service;
pub mod network_test_service;
pub mod settings_service;

pub use documentation_service::DocumentationService;
pub use health_service::HealthService;
pub use menu_service::{default_menu_items, MenuService};
pub use network_test_service::NetworkTestService;
pub use settings_service::SettingsService;
