//! Login user directory
//!
//! Users come from `auth.users` (pre-hashed bcrypt passwords). When
//! `ADMIN_PASSWORD` is set an `admin` account is derived from it at startup.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use hubdash_shared::config::AuthSettings;

use crate::password::{PasswordError, PasswordService};
use crate::session::{Role, SessionUser};

#[derive(Debug, Clone)]
struct StoredUser {
    password_hash: String,
    role: Role,
}

/// Login activity since the process started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStats {
    pub login_count: u64,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, StoredUser>,
    stats: DashMap<String, LoginStats>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &AuthSettings) -> Result<Self, PasswordError> {
        let mut directory = Self::new();
        for entry in &settings.users {
            directory.insert_hashed(&entry.username, &entry.password_hash, Role::parse(&entry.role));
        }
        if let Some(password) = settings.admin_password.as_deref().filter(|p| !p.is_empty()) {
            directory.insert("admin", password, Role::Admin)?;
            info!("Administrator account configured from ADMIN_PASSWORD");
        }
        if directory.is_empty() {
            warn!("No login users configured; admin routes are unreachable");
        }
        Ok(directory)
    }

    /// Add a user from a plain-text password.
    pub fn insert(&mut self, username: &str, password: &str, role: Role) -> Result<(), PasswordError> {
        let hash = PasswordService::hash(password)?;
        self.insert_hashed(username, &hash, role);
        Ok(())
    }

    pub fn insert_hashed(&mut self, username: &str, password_hash: &str, role: Role) {
        self.users.insert(
            username.trim().to_string(),
            StoredUser {
                password_hash: password_hash.to_string(),
                role,
            },
        );
    }

    /// `Ok(None)` for an unknown user or a wrong password. A successful login
    /// is counted in [`LoginStats`].
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<SessionUser>, PasswordError> {
        let Some(stored) = self.users.get(username.trim()) else {
            return Ok(None);
        };
        if !PasswordService::verify(password, &stored.password_hash)? {
            return Ok(None);
        }

        let username = username.trim().to_string();
        let mut stats = self.stats.entry(username.clone()).or_default();
        stats.login_count += 1;
        stats.last_login = Some(Utc::now());
        drop(stats);

        Ok(Some(SessionUser {
            username,
            role: stored.role,
        }))
    }

    pub fn login_stats(&self, username: &str) -> LoginStats {
        self.stats
            .get(username)
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }
}
