#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, middleware};
use axum_test::TestServer;
use linkbio::api::middleware::auth;
use linkbio::api::routes::protected_routes;
use linkbio::domain::entities::{NewPost, PostStatus};
use linkbio::domain::reducer::Action;
use linkbio::domain::repositories::{KeyValueStore, StoreError, StoreResult};
use linkbio::infrastructure::store::MemoryStore;
use linkbio::state::AppState;

pub const TEST_TOKEN: &str = "test-admin-token-0123";

pub fn auth_header() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

/// State backed by a fresh in-memory store.
pub async fn create_test_state() -> AppState {
    AppState::from_store(Arc::new(MemoryStore::new()), TEST_TOKEN).await
}

/// State over an existing store, e.g. one seeded with raw documents.
pub async fn create_state_with_store(store: Arc<dyn KeyValueStore>) -> AppState {
    AppState::from_store(store, TEST_TOKEN).await
}

/// The admin API under `/api`, behind the bearer-token middleware.
pub fn api_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest(
            "/api",
            protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state);
    TestServer::new(app).unwrap()
}

pub async fn create_test_post(state: &AppState, id: i64, caption: &str, link: &str) {
    state
        .bio_service
        .dispatch(Action::AddPost(
            NewPost::new()
                .with_id(id)
                .with_caption(caption)
                .with_link_url(link),
        ))
        .await;
}

pub async fn create_published_post(state: &AppState, id: i64, caption: &str, link: &str) {
    state
        .bio_service
        .dispatch(Action::AddPost(
            NewPost::new()
                .with_id(id)
                .with_status(PostStatus::Published)
                .with_caption(caption)
                .with_link_url(link),
        ))
        .await;
}

/// A store whose every operation fails, like an unreachable Redis.
pub struct UnreachableStore;

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}
