//! Key-value persistence contract for the bio page documents.

use async_trait::async_trait;
use std::fmt;

/// Errors raised by key-value store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The documents the application keeps in the store, one JSON value each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// JSON array of posts.
    Posts,
    /// JSON object with page settings.
    Settings,
    /// JSON object mapping post ids to click counts.
    Analytics,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [Self::Posts, Self::Settings, Self::Analytics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Settings => "settings",
            Self::Analytics => "analytics",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque asynchronous get/set store holding JSON strings.
///
/// No ordering or transactional guarantees are assumed: each `set` stands on
/// its own.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`] - In-process map
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(json))` if present
    /// - `Ok(None)` if the key was never written
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] or [`StoreError::Operation`] when the
    /// backend cannot be reached or rejects the command.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] or [`StoreError::Operation`] on
    /// backend failures.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Backend name for health reports and logs.
    fn backend(&self) -> &'static str;
}
