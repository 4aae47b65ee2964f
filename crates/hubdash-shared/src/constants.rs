//! Application-wide constants

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SESSION_SECRET: &str = "hubdash-development-secret";
pub const DEFAULT_DOCUMENTATION_DIR: &str = "documentation";
pub const DEFAULT_SITE_SETTINGS_FILE: &str = "data/config.json";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

pub const SESSION_COOKIE_NAME: &str = "hubdash.sid";
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

pub const CLIENT_ERROR_REPORT_TIMEOUT_SECS: u64 = 10;

pub const NETWORK_TEST_SERVER_TIMEOUT_SECS: u64 = 30;
pub const NETWORK_TEST_CLIENT_TIMEOUT_SECS: u64 = 60;
pub const PING_COUNT: u32 = 4;
pub const TRACEROUTE_MAX_HOPS: u32 = 10;

pub const PRODUCTION_ORIGIN: &str = "https://yourdomain.com";
