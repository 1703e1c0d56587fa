//! Redis-backed key-value store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

/// Redis store for the bio page documents.
///
/// Uses `ConnectionManager` for automatic reconnects. Keys are namespaced with
/// a prefix (`linkbio:` by default) so several pages can share one database.
/// Unlike a cache, errors are returned to the caller, which decides how to
/// degrade.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> StoreResult<Self> {
        info!("Connecting to Redis store");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.into(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        namespaced_key(&self.key_prefix, key)
    }
}

fn namespaced_key(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, key)
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| StoreError::Operation(format!("GET {}: {}", full_key, e)))?;

        debug!(
            key = %full_key,
            hit = value.is_some(),
            "Store GET"
        );
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(&full_key, value)
            .await
            .map_err(|e| StoreError::Operation(format!("SET {}: {}", full_key, e)))?;

        debug!(key = %full_key, bytes = value.len(), "Store SET");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
