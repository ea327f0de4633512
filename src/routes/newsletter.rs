//! Newsletter signup route.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Subscriber, is_unique_violation};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Subscribe an email address to the newsletter.
///
/// POST /api/newsletter
/// - Signup is open to anonymous visitors
/// - A repeat signup gets a distinct 409 so the client can tell the visitor
///   they are already on the list
async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> AppResult<Json<Subscriber>> {
    let email = request.email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest(
            "a valid email address is required".to_string(),
        ));
    }

    match Subscriber::create(state.db(), &email).await {
        Ok(subscriber) => {
            tracing::info!(subscriber_id = %subscriber.id, "new newsletter subscriber");
            Ok(Json(subscriber))
        }
        Err(err) if is_unique_violation(&err) => Err(AppError::Conflict(
            "this email address is already subscribed".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// Create the newsletter router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/newsletter", post(subscribe))
}
