//! Authentication routes (register, login, logout).

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{CreateProfile, Profile, is_unique_violation};
use crate::state::AppState;

/// Session key for storing the authenticated user ID.
pub const SESSION_USER_ID: &str = "user_id";

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for auth operations.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// Store the authenticated user id in the session.
async fn setup_session(session: &Session, user_id: uuid::Uuid) -> AppResult<()> {
    session
        .insert(SESSION_USER_ID, user_id)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to write session: {e}")))?;

    Ok(())
}

/// Register a new account.
///
/// POST /api/auth/register
/// - New profiles start as role `user`, tier `free`
/// - Logs the new account in immediately
async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = request.email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest(
            "a valid email address is required".to_string(),
        ));
    }
    if request.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let input = CreateProfile {
        email,
        password: request.password,
        full_name: request.full_name.filter(|n| !n.trim().is_empty()),
    };

    let profile = match Profile::create(state.db(), input).await {
        Ok(profile) => profile,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    setup_session(&session, profile.id).await?;

    info!(user_id = %profile.id, "account registered");
    Ok(Json(AuthResponse {
        success: true,
        message: "Registration successful".to_string(),
    }))
}

/// Log in with email and password.
///
/// POST /api/auth/login
/// - Invalid email and wrong password get the same generic 401
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = request.email.trim().to_lowercase();

    let profile = Profile::find_by_email(state.db(), &email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !profile.verify_password(&request.password) {
        return Err(AppError::Unauthorized);
    }

    setup_session(&session, profile.id).await?;

    info!(user_id = %profile.id, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}

/// Log out and destroy the session.
///
/// POST /api/auth/logout
async fn logout(session: Session) -> AppResult<Json<AuthResponse>> {
    session
        .delete()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to delete session: {e}")))?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Logout successful".to_string(),
    }))
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}
