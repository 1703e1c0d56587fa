//! Public web routes.

use crate::api::handlers::redirect_handler;
use crate::state::AppState;
use crate::web::handlers::bio_page_handler;
use axum::{Router, routing::get};

/// Routes visible to visitors.
///
/// - `GET /`         - Bio page with published posts
/// - `GET /go/{id}`  - Click-through redirect with tracking
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bio_page_handler))
        .route("/go/{id}", get(redirect_handler))
}
