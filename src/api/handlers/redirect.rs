//! Handler for the public click-through redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::domain::entities::PostId;
use crate::domain::posts::find_post;
use crate::domain::reducer::{Action, BioState};
use crate::error::AppError;
use crate::state::AppState;

/// Counts a visitor click and redirects to the post link.
///
/// # Endpoint
///
/// `GET /go/{id}`
///
/// # Behavior
///
/// 1. Checks that the post exists, is published and has a link
/// 2. Records the click on the post and in the click ledger
/// 3. Redirects with **307 Temporary Redirect** so every visit reaches the server
///
/// # Errors
///
/// Returns 404 Not Found for unknown posts, drafts, and posts without a link.
pub async fn redirect_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let id = PostId(id);

    let next = state
        .bio_service
        .dispatch_checked(Action::TrackClick(id), move |current| {
            clickable_link(current, id).map(|_| ())
        })
        .await?;

    let target = clickable_link(&next, id)?;

    metrics::counter!("linkbio_clicks_total").increment(1);
    tracing::debug!(id = %id, target = %target, "Click tracked");

    Ok(Redirect::temporary(&target))
}

fn clickable_link(state: &BioState, id: PostId) -> Result<String, AppError> {
    find_post(&state.posts, id)
        .filter(|post| post.is_published())
        .and_then(|post| post.link_url())
        .map(str::to_string)
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
}
