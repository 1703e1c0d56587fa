//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, state loading, and the Axum server lifecycle.

use crate::config::{Config, StoreConfig};
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the configured store.
///
/// Redis when configured and reachable; otherwise an in-memory store, with a
/// warning if Redis was configured but failed.
pub async fn open_store(config: &StoreConfig) -> Arc<dyn KeyValueStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url, config.key_prefix.clone()).await {
            Ok(redis) => {
                tracing::info!("Store enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using MemoryStore.", e);
            }
        }
    } else {
        tracing::info!("Redis not configured, using MemoryStore");
    }

    Arc::new(MemoryStore::new())
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config.store_config()).await;
    let state = AppState::from_store(store, &config.admin_token).await;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
