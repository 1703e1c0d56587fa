//! Bio page service: owns the current state and its persistence.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Analytics, Post, PostId, Settings};
use crate::domain::posts;
use crate::domain::reducer::{Action, BioState, reduce};
use crate::domain::repositories::{KeyValueStore, StorageKey};
use crate::domain::stats::{StatsSummary, compute_stats};
use crate::error::AppError;

/// Extra attempts for a failed store write (three attempts in total).
const PERSIST_RETRIES: usize = 2;

/// Service holding the bio page state in memory and mirroring it to a store.
///
/// Mutations are serialized through a write lock: an action is reduced
/// against the current state, the touched documents are written, then the
/// new state replaces the old one. Store failures never reach the reducer.
/// A failed load falls back to defaults for that document, and a failed write
/// is retried, then logged and counted.
pub struct BioService<S: KeyValueStore + ?Sized = dyn KeyValueStore> {
    store: Arc<S>,
    state: RwLock<BioState>,
}

impl<S: KeyValueStore + ?Sized> BioService<S> {
    /// Creates a service with an empty default state.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: RwLock::new(BioState::default()),
        }
    }

    /// Creates a service and loads the current documents from `store`.
    pub async fn load(store: Arc<S>) -> Self {
        let service = Self::new(store);
        service.reload().await;
        service
    }

    /// Replaces the in-memory state with whatever the store holds now.
    pub async fn reload(&self) {
        let loaded = BioState {
            posts: self.load_document(StorageKey::Posts).await,
            settings: self.load_document(StorageKey::Settings).await,
            analytics: self.load_document(StorageKey::Analytics).await,
        };

        info!(
            backend = self.store.backend(),
            posts = loaded.posts.len(),
            "Loaded bio state"
        );

        *self.state.write().await = loaded;
    }

    async fn load_document<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        match self.store.get(key.as_str()).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key = %key, error = %e, "Stored document is malformed, using defaults");
                    T::default()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No stored document, using defaults");
                T::default()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load document, using defaults");
                T::default()
            }
        }
    }

    /// Applies `action` and persists the documents it touched.
    pub async fn dispatch(&self, action: Action) -> BioState {
        let mut state = self.state.write().await;
        self.apply(&mut state, action).await
    }

    /// Applies `action` only if `check` accepts the current state.
    ///
    /// The check and the update run under the same lock, so a precondition
    /// such as "this post exists" cannot go stale in between.
    ///
    /// # Errors
    ///
    /// Returns whatever error `check` produces; the state is left unchanged.
    pub async fn dispatch_checked<F>(&self, action: Action, check: F) -> Result<BioState, AppError>
    where
        F: FnOnce(&BioState) -> Result<(), AppError>,
    {
        let mut state = self.state.write().await;
        check(&state)?;
        Ok(self.apply(&mut state, action).await)
    }

    async fn apply(&self, state: &mut BioState, action: Action) -> BioState {
        let name = action.name();
        let keys = action.touched_keys();
        let next = reduce(state, action);

        for key in keys {
            self.persist(&next, *key).await;
        }

        debug!(action = name, posts = next.posts.len(), "Applied action");
        *state = next.clone();
        next
    }

    async fn persist(&self, state: &BioState, key: StorageKey) {
        let payload = match key {
            StorageKey::Posts => serde_json::to_string(&state.posts),
            StorageKey::Settings => serde_json::to_string(&state.settings),
            StorageKey::Analytics => serde_json::to_string(&state.analytics),
        };

        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                error!(key = %key, error = %e, "Failed to serialize document");
                return;
            }
        };

        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(PERSIST_RETRIES);

        if let Err(e) = Retry::start(strategy, || self.store.set(key.as_str(), &payload)).await {
            error!(key = %key, error = %e, "Failed to persist document");
            metrics::counter!("linkbio_persist_failures_total", "key" => key.as_str())
                .increment(1);
        }
    }

    pub async fn snapshot(&self) -> BioState {
        self.state.read().await.clone()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    /// Published posts in display order.
    pub async fn published_posts(&self) -> Vec<Post> {
        posts::published(&self.state.read().await.posts)
            .cloned()
            .collect()
    }

    pub async fn find_post(&self, id: PostId) -> Option<Post> {
        posts::find_post(&self.state.read().await.posts, id).cloned()
    }

    pub async fn settings(&self) -> Settings {
        self.state.read().await.settings.clone()
    }

    pub async fn analytics(&self) -> Analytics {
        self.state.read().await.analytics.clone()
    }

    pub async fn stats(&self) -> StatsSummary {
        compute_stats(&self.state.read().await.posts)
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}

/// Precondition for [`BioService::dispatch_checked`]: the post must exist.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when no post has `id`.
pub fn require_post(id: PostId) -> impl FnOnce(&BioState) -> Result<(), AppError> {
    move |state| {
        if posts::find_post(&state.posts, id).is_some() {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Post not found",
                serde_json::json!({ "id": id }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewPost, PostStatus};
    use crate::domain::repositories::{MockKeyValueStore, StoreError};
    use crate::infrastructure::store::MemoryStore;
    use mockall::predicate::eq;

    fn empty_store() -> MockKeyValueStore {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_backend().return_const("mock");
        store
    }

    #[tokio::test]
    async fn test_load_reads_all_documents() {
        let store = Arc::new(MemoryStore::with_entries([
            (
                "posts",
                r#"[{"id":1,"status":"published","clicks":3,"caption":"a"},{"id":2}]"#,
            ),
            ("settings", r#"{"bioTitle":"@shop"}"#),
            ("analytics", r#"{"1":3}"#),
        ]));

        let service = BioService::load(store).await;
        let state = service.snapshot().await;

        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.posts[0].clicks, 3);
        assert_eq!(state.posts[1].status, PostStatus::Draft);
        assert_eq!(state.settings.bio_title, "@shop");
        assert_eq!(state.analytics.clicks_for(PostId(1)), 3);
    }

    #[tokio::test]
    async fn test_load_degrades_on_malformed_json() {
        let store = Arc::new(MemoryStore::with_entries([
            ("posts", "{not json"),
            ("settings", r#"{"bioTitle":"kept"}"#),
        ]));

        let service = BioService::load(store).await;

        assert!(service.posts().await.is_empty());
        assert_eq!(service.settings().await.bio_title, "kept");
    }

    #[tokio::test]
    async fn test_load_degrades_on_store_error() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .times(3)
            .returning(|_| Err(StoreError::Connection("down".to_string())));
        store.expect_backend().return_const("mock");

        let service = BioService::load(Arc::new(store)).await;

        assert_eq!(service.snapshot().await, BioState::default());
    }

    #[tokio::test]
    async fn test_dispatch_persists_touched_keys() {
        let store = Arc::new(MemoryStore::new());
        let service = BioService::new(store.clone());

        service
            .dispatch(Action::AddPost(NewPost::new().with_id(1).with_caption("a")))
            .await;
        service.dispatch(Action::TrackClick(PostId(1))).await;

        let posts: Vec<Post> =
            serde_json::from_str(&store.get("posts").await.unwrap().unwrap()).unwrap();
        assert_eq!(posts[0].clicks, 1);

        let analytics: Analytics =
            serde_json::from_str(&store.get("analytics").await.unwrap().unwrap()).unwrap();
        assert_eq!(analytics.clicks_for(PostId(1)), 1);

        assert!(store.get("settings").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_writes_only_settings_for_settings_update() {
        let mut store = empty_store();
        store
            .expect_set()
            .with(eq("settings"), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BioService::new(Arc::new(store));
        let settings = Settings {
            bio_title: "@new".to_string(),
            ..Settings::default()
        };

        let state = service.dispatch(Action::UpdateSettings(settings)).await;
        assert_eq!(state.settings.bio_title, "@new");
    }

    #[tokio::test]
    async fn test_dispatch_keeps_state_when_persist_fails() {
        let mut store = empty_store();
        store
            .expect_set()
            .times(PERSIST_RETRIES + 1)
            .returning(|_, _| Err(StoreError::Operation("read-only".to_string())));

        let service = BioService::new(Arc::new(store));
        let state = service
            .dispatch(Action::AddPost(NewPost::new().with_id(9)))
            .await;

        assert_eq!(state.posts.len(), 1);
        assert_eq!(service.posts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_retries_transient_failure() {
        let mut store = empty_store();
        let mut seq = mockall::Sequence::new();
        store
            .expect_set()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(StoreError::Connection("blip".to_string())));
        store
            .expect_set()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = BioService::new(Arc::new(store));
        service.dispatch(Action::DeletePost(PostId(1))).await;
    }

    #[tokio::test]
    async fn test_dispatch_checked_rejects_missing_post() {
        let service = BioService::new(Arc::new(MemoryStore::new()));

        let result = service
            .dispatch_checked(Action::PublishPost(PostId(5)), require_post(PostId(5)))
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_dispatch_checked_applies_when_present() {
        let service = BioService::new(Arc::new(MemoryStore::new()));
        service
            .dispatch(Action::AddPost(NewPost::new().with_id(5)))
            .await;

        let state = service
            .dispatch_checked(Action::PublishPost(PostId(5)), require_post(PostId(5)))
            .await
            .unwrap();

        assert!(state.posts[0].is_published());
        assert_eq!(service.published_posts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_stats_follow_state() {
        let service = BioService::new(Arc::new(MemoryStore::new()));
        for id in [1, 2] {
            service
                .dispatch(Action::AddPost(
                    NewPost::new().with_id(id).with_status(PostStatus::Published),
                ))
                .await;
        }
        for _ in 0..3 {
            service.dispatch(Action::TrackClick(PostId(1))).await;
        }

        let stats = service.stats().await;
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.total_clicks, 3);
        assert_eq!(stats.avg_ctr, 2);
    }
}
