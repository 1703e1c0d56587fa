//! API route configuration.
//!
//! All API endpoints require the operator Bearer token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    analytics_handler, create_post_handler, delete_post_handler, get_settings_handler,
    list_posts_handler, publish_post_handler, stats_handler, track_click_handler,
    unpublish_post_handler, update_post_handler, update_settings_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// All admin API routes. Authentication is layered on by the caller.
///
/// # Endpoints
///
/// - `GET    /posts`                - List posts
/// - `POST   /posts`                - Create a post
/// - `PATCH  /posts/{id}`           - Update a post
/// - `DELETE /posts/{id}`           - Delete a post
/// - `POST   /posts/{id}/publish`   - Publish a post
/// - `POST   /posts/{id}/unpublish` - Move a post back to draft
/// - `POST   /posts/{id}/click`     - Record a click by hand
/// - `GET    /stats`                - Summary statistics
/// - `GET    /analytics`            - Per-post click ledger
/// - `GET    /settings`             - Page settings
/// - `PUT    /settings`             - Replace page settings
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts_handler).post(create_post_handler))
        .route(
            "/posts/{id}",
            patch(update_post_handler).delete(delete_post_handler),
        )
        .route("/posts/{id}/publish", post(publish_post_handler))
        .route("/posts/{id}/unpublish", post(unpublish_post_handler))
        .route("/posts/{id}/click", post(track_click_handler))
        .route("/stats", get(stats_handler))
        .route("/analytics", get(analytics_handler))
        .route(
            "/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
}
