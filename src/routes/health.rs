//! Health check route.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    postgres: bool,
    redis: bool,
}

/// Report backend health.
///
/// GET /health — 200 when both stores answer, 503 otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres = state.postgres_healthy().await;
    let redis = state.redis_healthy().await;

    let healthy = postgres && redis;
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            postgres,
            redis,
        }),
    )
}

/// Create the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
