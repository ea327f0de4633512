//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod blog;
pub mod file;
pub mod health;
pub mod news;
pub mod newsletter;
pub mod profile;
pub mod research;

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Profile;
use crate::routes::auth::SESSION_USER_ID;
use crate::state::AppState;

/// Load the viewer's profile from the session, if signed in.
///
/// The session holds only the user id; the profile row is re-fetched on
/// every request so role and tier are never stale. A session pointing at a
/// deleted profile reads as anonymous.
pub async fn current_profile(state: &AppState, session: &Session) -> AppResult<Option<Profile>> {
    let user_id: Option<Uuid> = session.get(SESSION_USER_ID).await.ok().flatten();

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let profile = Profile::find_by_id(state.db(), user_id).await?;
    Ok(profile)
}

/// Load the viewer's profile, or fail with 401.
pub async fn require_profile(state: &AppState, session: &Session) -> AppResult<Profile> {
    current_profile(state, session)
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Load the viewer's profile and require the admin role, or fail with 403.
pub async fn require_admin(state: &AppState, session: &Session) -> AppResult<Profile> {
    let profile = require_profile(state, session).await?;

    if !profile.is_admin() {
        return Err(AppError::Forbidden(
            "admin role required".to_string(),
        ));
    }

    Ok(profile)
}
