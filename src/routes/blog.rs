//! Blog routes: public listings and authenticated post creation.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::filter;
use crate::models::{BlogPost, CreateBlogPost};
use crate::routes::{current_profile, require_profile};
use crate::state::AppState;

/// Query parameters for the blog listing.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

/// Blog listing response.
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<BlogPost>,
    pub total: usize,
}

/// List published posts, newest first.
///
/// GET /api/blog?search=&tag=
/// - The full published set is fetched, then narrowed in memory
async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<Json<PostListResponse>> {
    let posts = BlogPost::list_published(state.db()).await?;
    let posts = filter::apply(posts, query.search.as_deref(), query.tag.as_deref());

    let total = posts.len();
    Ok(Json(PostListResponse { posts, total }))
}

/// Distinct tags across published posts.
///
/// GET /api/blog/tags
async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let tags = BlogPost::published_tags(state.db()).await?;
    Ok(Json(tags))
}

/// Get a single post.
///
/// GET /api/blog/{id}
/// - Draft and pending posts are visible only to their author or an admin;
///   everyone else gets 404, not 403, so their existence isn't leaked
async fn get_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPost::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !post.is_published() {
        let viewer = current_profile(&state, &session).await?;
        let allowed = viewer
            .as_ref()
            .is_some_and(|p| p.id == post.author_id || p.is_admin());

        if !allowed {
            return Err(AppError::NotFound);
        }
    }

    Ok(Json(post))
}

/// Create a blog post.
///
/// POST /api/blog
/// - Required fields are validated before any database call; on failure the
///   client keeps its form state and nothing is written
/// - The author chooses the initial status (draft, pending, or published)
async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<Json<BlogPost>> {
    let author = require_profile(&state, &session).await?;

    validate_post(&input)?;

    let post = BlogPost::create(state.db(), author.id, &author.display_name(), input).await?;

    Ok(Json(post))
}

/// Reject posts with missing required fields.
fn validate_post(input: &CreateBlogPost) -> AppResult<()> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()));
    }
    if input.excerpt.trim().is_empty() {
        return Err(AppError::BadRequest("excerpt is required".to_string()));
    }

    Ok(())
}

/// Create the blog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/blog", get(list_posts))
        .route("/api/blog", post(create_post))
        .route("/api/blog/tags", get(list_tags))
        .route("/api/blog/{id}", get(get_post))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::PostStatus;

    fn input(title: &str, content: &str, excerpt: &str) -> CreateBlogPost {
        CreateBlogPost {
            title: title.to_string(),
            content: content.to_string(),
            excerpt: excerpt.to_string(),
            image_url: None,
            tags: vec![],
            status: PostStatus::Draft,
        }
    }

    #[test]
    fn empty_title_fails_validation() {
        let err = validate_post(&input("", "body", "summary")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("title")));
    }

    #[test]
    fn whitespace_title_fails_validation() {
        assert!(validate_post(&input("   ", "body", "summary")).is_err());
    }

    #[test]
    fn missing_content_and_excerpt_fail_validation() {
        assert!(validate_post(&input("t", "", "summary")).is_err());
        assert!(validate_post(&input("t", "body", "")).is_err());
    }

    #[test]
    fn complete_input_passes_validation() {
        assert!(validate_post(&input("t", "body", "summary")).is_ok());
    }
}
