//! Password hashing with bcrypt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        Self::hash_with_cost(password, bcrypt::DEFAULT_COST)
    }

    pub fn hash_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
        bcrypt::hash(password, cost).map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| PasswordError::HashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash_with_cost("admin123", 4).unwrap();
        assert!(PasswordService::verify("admin123", &hash).unwrap());
        assert!(!PasswordService::verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(PasswordService::verify("x", "not-a-hash").is_err());
    }
}
