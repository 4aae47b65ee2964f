//! Server-side login sessions
//!
//! The cookie carries `<session id>.<hex hmac-sha256(secret, id)>`; session
//! data never leaves the process. Sessions slide: every successful lookup
//! pushes the expiry forward by the TTL.

use chrono::Utc;
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Malformed session token")]
    Malformed,
    #[error("Invalid session signature")]
    InvalidSignature,
    #[error("Session not found")]
    NotFound,
    #[error("Session expired")]
    Expired,
    #[error("Session key error: {0}")]
    KeyError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone)]
struct Session {
    user: SessionUser,
    expires_at: i64,
}

pub struct SessionManager {
    secret: Vec<u8>,
    ttl_seconds: i64,
    sessions: DashMap<Uuid, Session>,
}

impl SessionManager {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_seconds,
            sessions: DashMap::new(),
        }
    }

    /// Start a session and return the cookie token.
    pub fn create(&self, user: SessionUser) -> Result<String, SessionError> {
        let id = Uuid::new_v4();
        let signature = hex::encode(self.mac(&id)?.finalize().into_bytes());
        debug!("Session created for {}", user.username);
        self.sessions.insert(
            id,
            Session {
                user,
                expires_at: Utc::now().timestamp() + self.ttl_seconds,
            },
        );
        Ok(format!("{id}.{signature}"))
    }

    /// Look up the user behind `token` and refresh the session.
    pub fn resolve(&self, token: &str) -> Result<SessionUser, SessionError> {
        let id = self.verify(token)?;
        let now = Utc::now().timestamp();

        let mut entry = self.sessions.get_mut(&id).ok_or(SessionError::NotFound)?;
        if entry.expires_at <= now {
            drop(entry);
            self.sessions.remove(&id);
            return Err(SessionError::Expired);
        }
        entry.expires_at = now + self.ttl_seconds;
        Ok(entry.user.clone())
    }

    /// Returns `true` when a live session was removed.
    pub fn destroy(&self, token: &str) -> bool {
        match self.verify(token) {
            Ok(id) => self.sessions.remove(&id).is_some(),
            Err(_) => false,
        }
    }

    /// Drop expired sessions and return how many were removed.
    ///
    /// Sessions created while the purge runs are never miscounted.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now().timestamp();
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let live = session.expires_at > now;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    fn verify(&self, token: &str) -> Result<Uuid, SessionError> {
        let (id, signature) = token.split_once('.').ok_or(SessionError::Malformed)?;
        let id = Uuid::parse_str(id).map_err(|_| SessionError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| SessionError::Malformed)?;
        self.mac(&id)?
            .verify_slice(&signature)
            .map_err(|_| SessionError::InvalidSignature)?;
        Ok(id)
    }

    fn mac(&self, id: &Uuid) -> Result<HmacSha256, SessionError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| SessionError::KeyError(e.to_string()))?;
        mac.update(id.as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> SessionUser {
        SessionUser {
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_create_and_resolve() {
        let manager = SessionManager::new("secret", 60);
        let token = manager.create(admin()).unwrap();
        let user = manager.resolve(&token).unwrap();
        assert!(user.is_admin());
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let manager = SessionManager::new("secret", 60);
        let token = manager.create(admin()).unwrap();
        let (id, _) = token.split_once('.').unwrap();
        let forged = format!("{id}.{}", "00".repeat(32));
        assert_eq!(manager.resolve(&forged), Err(SessionError::InvalidSignature));
        assert_eq!(manager.resolve("garbage"), Err(SessionError::Malformed));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = SessionManager::new("one", 60);
        let other = SessionManager::new("two", 60);
        let token = issuer.create(admin()).unwrap();
        assert_eq!(other.resolve(&token), Err(SessionError::InvalidSignature));
    }

    #[test]
    fn test_expired_session() {
        let manager = SessionManager::new("secret", 0);
        let token = manager.create(admin()).unwrap();
        assert_eq!(manager.resolve(&token), Err(SessionError::Expired));
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_destroy() {
        let manager = SessionManager::new("secret", 60);
        let token = manager.create(admin()).unwrap();
        assert!(manager.destroy(&token));
        assert!(!manager.destroy(&token));
        assert_eq!(manager.resolve(&token), Err(SessionError::NotFound));
    }

    #[test]
    fn test_purge_expired() {
        let manager = SessionManager::new("secret", 0);
        manager.create(admin()).unwrap();
        manager.create(admin()).unwrap();
        assert_eq!(manager.purge_expired(), 2);
        assert_eq!(manager.purge_expired(), 0);
    }

    #[test]
    fn test_purge_while_sessions_are_created() {
        let manager = SessionManager::new("secret", 0);
        let mut purged = 0;

        std::thread::scope(|scope| {
            let creator = scope.spawn(|| {
                for _ in 0..500 {
                    manager.create(admin()).unwrap();
                }
            });
            while !creator.is_finished() {
                purged += manager.purge_expired();
            }
        });
        purged += manager.purge_expired();

        assert_eq!(purged, 500);
        assert_eq!(manager.active_count(), 0);
    }
}
