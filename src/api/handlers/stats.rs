//! Handlers for statistics endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::domain::entities::PostId;
use crate::domain::stats::StatsSummary;
use crate::state::AppState;

/// Returns summary statistics computed from the current posts.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// { "totalPosts": 4, "totalClicks": 31, "avgCtr": 16 }
/// ```
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSummary> {
    Json(state.bio_service.stats().await)
}

/// One entry of the click ledger.
#[derive(Debug, Serialize)]
pub struct AnalyticsEntry {
    pub id: PostId,
    pub clicks: u64,
    /// False when the post has since been deleted.
    pub exists: bool,
}

/// Returns the per-post click ledger, including deleted posts.
///
/// # Endpoint
///
/// `GET /api/analytics`
pub async fn analytics_handler(State(state): State<AppState>) -> Json<Vec<AnalyticsEntry>> {
    let snapshot = state.bio_service.snapshot().await;

    let entries = snapshot
        .analytics
        .iter()
        .map(|(id, clicks)| AnalyticsEntry {
            id,
            clicks,
            exists: snapshot.posts.iter().any(|p| p.id == id),
        })
        .collect();

    Json(entries)
}
