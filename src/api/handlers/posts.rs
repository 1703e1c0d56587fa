//! Handlers for post management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::post::{CreatePostRequest, UpdatePostRequest};
use crate::application::services::require_post;
use crate::domain::entities::{Post, PostId};
use crate::domain::posts::find_post;
use crate::domain::reducer::{Action, BioState};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all posts, drafts included, in display order.
///
/// # Endpoint
///
/// `GET /api/posts`
pub async fn list_posts_handler(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.bio_service.posts().await)
}

/// Creates a post.
///
/// # Endpoint
///
/// `POST /api/posts`
///
/// New posts start with zero clicks and default to draft. When `id` is
/// omitted a time-based id is generated.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the supplied id is already taken.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    payload.validate()?;

    let data = payload.into_new_post()?;
    let requested_id = data.id;

    let next = state
        .bio_service
        .dispatch_checked(Action::AddPost(data), move |current| {
            match requested_id {
                Some(id) if find_post(&current.posts, id).is_some() => Err(AppError::conflict(
                    "Post id already exists",
                    json!({ "id": id }),
                )),
                _ => Ok(()),
            }
        })
        .await?;

    let created = next
        .posts
        .last()
        .cloned()
        .ok_or_else(|| AppError::internal("Post was not created", json!({})))?;

    tracing::info!(id = %created.id, status = %created.status, "Post created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially updates a post's display fields or status.
///
/// # Endpoint
///
/// `PATCH /api/posts/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the post doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    payload.validate()?;

    let id = PostId(id);
    let patch = payload.into_patch()?;

    let next = state
        .bio_service
        .dispatch_checked(Action::UpdatePost { id, patch }, require_post(id))
        .await?;

    post_in(&next, id).map(Json)
}

/// Deletes a post.
///
/// # Endpoint
///
/// `DELETE /api/posts/{id}`
///
/// The post's history in the click ledger is kept.
///
/// # Errors
///
/// Returns 404 Not Found if the post doesn't exist.
pub async fn delete_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = PostId(id);

    state
        .bio_service
        .dispatch_checked(Action::DeletePost(id), require_post(id))
        .await?;

    tracing::info!(id = %id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Publishes a post to the public page.
///
/// # Endpoint
///
/// `POST /api/posts/{id}/publish`
///
/// # Errors
///
/// Returns 404 Not Found if the post doesn't exist.
pub async fn publish_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    apply_to_post(&state, PostId(id), Action::PublishPost(PostId(id))).await
}

/// Moves a post back to draft.
///
/// # Endpoint
///
/// `POST /api/posts/{id}/unpublish`
///
/// # Errors
///
/// Returns 404 Not Found if the post doesn't exist.
pub async fn unpublish_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    apply_to_post(&state, PostId(id), Action::UnpublishPost(PostId(id))).await
}

/// Records a click by hand, e.g. for clicks counted outside the page.
///
/// # Endpoint
///
/// `POST /api/posts/{id}/click`
///
/// Works for drafts too; the public redirect only counts published posts.
///
/// # Errors
///
/// Returns 404 Not Found if the post doesn't exist.
pub async fn track_click_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    apply_to_post(&state, PostId(id), Action::TrackClick(PostId(id))).await
}

async fn apply_to_post(state: &AppState, id: PostId, action: Action) -> Result<Json<Post>, AppError> {
    let next = state
        .bio_service
        .dispatch_checked(action, require_post(id))
        .await?;

    post_in(&next, id).map(Json)
}

fn post_in(state: &BioState, id: PostId) -> Result<Post, AppError> {
    find_post(&state.posts, id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
}
