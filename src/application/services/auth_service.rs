//! Operator authentication for the admin API.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Checks bearer tokens against the single operator token.
///
/// Only the SHA-256 digest of the configured token is kept in memory, and
/// presented tokens are compared digest to digest.
pub struct AuthService {
    token_hash: String,
}

impl AuthService {
    /// Creates the service from the raw operator token (`ADMIN_TOKEN`).
    pub fn new(admin_token: &str) -> Self {
        Self {
            token_hash: hash_token(admin_token),
        }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if hash_token(token) == self.token_hash {
            Ok(())
        } else {
            Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid token"}),
            ))
        }
    }
}

/// Returns the 64-character lowercase hex SHA-256 digest of `token`.
fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AuthService::new("operator-token-123456");
        assert!(service.authenticate("operator-token-123456").is_ok());
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let service = AuthService::new("operator-token-123456");
        let result = service.authenticate("guess");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token("test-token");
        let hash2 = hash_token("test-token");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_token("test-token2"));
    }

    #[test]
    fn test_raw_token_not_stored() {
        let service = AuthService::new("operator-token-123456");
        assert!(!service.token_hash.contains("operator"));
    }
}
