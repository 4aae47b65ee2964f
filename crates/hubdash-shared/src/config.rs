//! Configuration management
//!
//! The resolved configuration is a common record merged with one
//! environment overlay. The overlay is picked by `NODE_ENV` once at startup.

use ::config::{Config, Environment as EnvironmentSource, File};
use serde::Deserialize;
use std::fmt;

use crate::constants::{
    DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DOCUMENTATION_DIR, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    DEFAULT_SESSION_SECRET, DEFAULT_SITE_SETTINGS_FILE, NETWORK_TEST_SERVER_TIMEOUT_SECS, PRODUCTION_ORIGIN,
};
use crate::error::AppError;

/// Deployment environment selected by `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Unknown or missing values fall back to development.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("production") => Self::Production,
            Some("test") => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn overlay(self) -> Overlay {
        match self {
            Self::Development => Overlay {
                debug: true,
                cors: CorsSettings::any_origin(),
                secure_session: false,
                port: None,
            },
            Self::Production => Overlay {
                debug: false,
                cors: CorsSettings {
                    origin: PRODUCTION_ORIGIN.to_string(),
                    credentials: true,
                },
                secure_session: true,
                port: None,
            },
            Self::Test => Overlay {
                debug: true,
                cors: CorsSettings::any_origin(),
                secure_session: false,
                port: Some(3001),
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment-specific values layered over the common record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub debug: bool,
    pub cors: CorsSettings,
    pub secure_session: bool,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub origin: String,
    pub credentials: bool,
}

impl CorsSettings {
    fn any_origin() -> Self {
        Self {
            origin: "*".to_string(),
            credentials: true,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.origin == "*"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub port: u16,
    pub session_secret: String,
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<String>,
    pub debug: bool,
    pub cors: CorsSettings,
    pub secure_session: bool,
    pub database: DatabaseSettings,
    pub documentation: DocumentationSettings,
    pub site: SiteStoreSettings,
    pub network_test: NetworkTestSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Empty selects the in-memory menu store.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentationSettings {
    pub dir: String,
}

/// Where the admin-editable site settings (`proxyDomain`, `logo`, `theme`) live.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteStoreSettings {
    pub file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkTestSettings {
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthSettings {
    #[serde(default)]
    pub users: Vec<UserEntry>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserEntry {
    pub username: String,
    pub password_hash: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl AppConfig {
    /// Load from `.env`, the process environment and optional `config/` files.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from a variable lookup.
    pub fn resolve<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::parse(lookup("NODE_ENV").as_deref());
        let overlay = env.overlay();

        let common_port = match lookup("PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                AppError::InvalidVariable {
                    name: "PORT",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let port = overlay.port.or(common_port);

        let config = Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("session_secret", DEFAULT_SESSION_SECRET)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", i64::from(DEFAULT_DB_MAX_CONNECTIONS))?
            .set_default("documentation.dir", DEFAULT_DOCUMENTATION_DIR)?
            .set_default("site.file", DEFAULT_SITE_SETTINGS_FILE)?
            .set_default(
                "network_test.timeout_seconds",
                NETWORK_TEST_SERVER_TIMEOUT_SECS as i64,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env.as_str())).required(false))
            .add_source(
                EnvironmentSource::with_prefix("HUBDASH")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("port", port.map(i64::from))?
            .set_override_option("session_secret", lookup("SESSION_SECRET"))?
            .set_override_option("log_level", lookup("LOG_LEVEL"))?
            .set_override_option("log_dir", lookup("LOG_DIR"))?
            .set_override_option("database.url", lookup("DATABASE_URL"))?
            .set_override_option("auth.admin_password", lookup("ADMIN_PASSWORD"))?
            .set_override("debug", overlay.debug)?
            .set_override("cors.origin", overlay.cors.origin.clone())?
            .set_override("cors.credentials", overlay.cors.credentials)?
            .set_override("secure_session", overlay.secure_session)?
            .set_override("env", env.as_str())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }

    pub fn uses_database(&self) -> bool {
        !self.database.url.trim().is_empty()
    }
}
