//! Handlers for page settings.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::settings::UpdateSettingsRequest;
use crate::domain::entities::Settings;
use crate::domain::reducer::Action;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the current page settings.
///
/// # Endpoint
///
/// `GET /api/settings`
pub async fn get_settings_handler(State(state): State<AppState>) -> Json<Settings> {
    Json(state.bio_service.settings().await)
}

/// Replaces the page settings.
///
/// # Endpoint
///
/// `PUT /api/settings`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>, AppError> {
    payload.validate()?;

    let next = state
        .bio_service
        .dispatch(Action::UpdateSettings(payload.into()))
        .await;

    Ok(Json(next.settings))
}
