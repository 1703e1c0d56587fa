//! In-process key-value store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{KeyValueStore, StoreResult};

/// A store that keeps documents in memory.
///
/// Used when Redis is not configured or unreachable at startup, and in
/// tests. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted across restarts)");
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("posts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("posts", "[]").await.unwrap();
        store.set("posts", "[{\"id\":1}]").await.unwrap();
        assert_eq!(
            store.get("posts").await.unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
    }

    #[tokio::test]
    async fn test_with_entries() {
        let store = MemoryStore::with_entries([("settings", "{}")]);
        assert_eq!(store.get("settings").await.unwrap().as_deref(), Some("{}"));
        assert!(store.health_check().await);
        assert_eq!(store.backend(), "memory");
    }
}
