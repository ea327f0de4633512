//! Profile routes: view and edit the signed-in account.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::{Profile, UpdateProfile};
use crate::routes::require_profile;
use crate::state::AppState;

/// Get the signed-in profile.
///
/// GET /api/profile
async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Profile>> {
    let profile = require_profile(&state, &session).await?;
    Ok(Json(profile))
}

/// Update the signed-in profile's editable fields.
///
/// PUT /api/profile
async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<Profile>> {
    let viewer = require_profile(&state, &session).await?;

    let updated = Profile::update(state.db(), viewer.id, input)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

/// Create the profile router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/profile", get(get_profile).put(update_profile))
}
