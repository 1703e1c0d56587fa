//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`          - Public bio page
//! - `GET  /go/{id}`   - Click-through redirect (public)
//! - `GET  /health`    - Health check (public)
//! - `/api/*`          - Admin REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter for the admin API
//! - **Authentication** - Operator bearer token on `/api/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = rate_limit::apply(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        rate_limit::ADMIN,
        behind_proxy,
    );

    let web_router = rate_limit::apply(
        web::routes::public_routes(),
        rate_limit::PUBLIC,
        behind_proxy,
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(web_router)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
