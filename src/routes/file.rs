//! Image upload route.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::file::{MAX_IMAGE_BYTES, UploadError};
use crate::routes::require_profile;
use crate::state::AppState;

/// Request body limit for the upload route.
///
/// Sized above [`MAX_IMAGE_BYTES`] plus multipart framing so an image at the
/// documented cap passes the extractor and the size check in
/// [`FileService::store_image`](crate::file::FileService::store_image) is the
/// one that decides. Axum's 2 MB default would otherwise reject valid images
/// before the service ever sees them.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// Upload response carrying the public URL of the stored image.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Upload an image (avatar or post illustration).
///
/// POST /api/files/images (multipart, field name `file`)
async fn upload_image(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let profile = require_profile(&state, &session).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("invalid multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("failed to read upload: {err}")))?;

        let url = state
            .files()
            .store_image(&filename, &data)
            .await
            .map_err(|err| match err {
                UploadError::TooLarge | UploadError::NotAnImage => {
                    AppError::BadRequest(err.to_string())
                }
                UploadError::Storage(err) => AppError::Internal(err),
            })?;

        tracing::info!(user_id = %profile.id, url = %url, "image uploaded");

        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::BadRequest(
        "multipart field 'file' is required".to_string(),
    ))
}

/// Create the file router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/files/images", post(upload_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
