//! Admin routes: moderation queue, article management, user overview.
//!
//! Every handler here requires the admin role; the role is checked against a
//! freshly loaded profile on each request so a demotion takes effect
//! immediately.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BlogPost, CreateResearchArticle, ModerationAction, Profile, ResearchArticle, Subscriber,
};
use crate::routes::require_admin;
use crate::state::AppState;

/// Pending-posts queue response.
#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub posts: Vec<BlogPost>,
    pub total: usize,
}

/// User listing response.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<Profile>,
    pub total: usize,
}

/// Site-wide counters for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub pending_posts: i64,
    pub users: i64,
    pub premium_users: i64,
    pub articles: i64,
    pub subscribers: i64,
}

/// List posts awaiting moderation, oldest first.
///
/// GET /api/admin/pending
async fn list_pending(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<PendingResponse>> {
    require_admin(&state, &session).await?;

    let posts = BlogPost::list_pending(state.db()).await?;
    let total = posts.len();

    Ok(Json(PendingResponse { posts, total }))
}

/// Approve a pending post, publishing it.
///
/// POST /api/admin/posts/{id}/approve
async fn approve_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BlogPost>> {
    moderate_post(&state, &session, id, ModerationAction::Approve).await
}

/// Reject a pending post, returning it to the author's drafts.
///
/// POST /api/admin/posts/{id}/reject
async fn reject_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BlogPost>> {
    moderate_post(&state, &session, id, ModerationAction::Reject).await
}

async fn moderate_post(
    state: &AppState,
    session: &Session,
    id: Uuid,
    action: ModerationAction,
) -> AppResult<Json<BlogPost>> {
    let admin = require_admin(state, session).await?;

    // None means the post is gone or not pending; both read as 404 here so a
    // double-click on approve does not surface a confusing error.
    let post = BlogPost::moderate(state.db(), id, action)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(
        post_id = %post.id,
        admin_id = %admin.id,
        status = ?post.status,
        "moderated blog post"
    );

    Ok(Json(post))
}

/// Publish a research article to the catalog.
///
/// POST /api/admin/articles
async fn create_article(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateResearchArticle>,
) -> AppResult<Json<ResearchArticle>> {
    require_admin(&state, &session).await?;

    validate_article(&input)?;

    let article = ResearchArticle::create(state.db(), input).await?;

    tracing::info!(article_id = %article.id, "created research article");

    Ok(Json(article))
}

/// Remove a research article from the catalog.
///
/// DELETE /api/admin/articles/{id}
async fn delete_article(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&state, &session).await?;

    let deleted = ResearchArticle::delete(state.db(), id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    tracing::info!(article_id = %id, "deleted research article");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// List all registered users, newest first.
///
/// GET /api/admin/users
async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<UserListResponse>> {
    require_admin(&state, &session).await?;

    let users = Profile::list(state.db()).await?;
    let total = users.len();

    Ok(Json(UserListResponse { users, total }))
}

/// Dashboard counters.
///
/// GET /api/admin/stats
async fn stats(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<StatsResponse>> {
    require_admin(&state, &session).await?;

    let pending_posts = BlogPost::count_pending(state.db()).await?;
    let users = Profile::count(state.db()).await?;
    let premium_users = Profile::count_premium(state.db()).await?;
    let articles = ResearchArticle::count(state.db()).await?;
    let subscribers = Subscriber::count(state.db()).await?;

    Ok(Json(StatsResponse {
        pending_posts,
        users,
        premium_users,
        articles,
        subscribers,
    }))
}

fn validate_article(input: &CreateResearchArticle) -> AppResult<()> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if input.abstract_text.trim().is_empty() {
        return Err(AppError::BadRequest(
            "abstract must not be empty".to_string(),
        ));
    }
    if input.author_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "author name must not be empty".to_string(),
        ));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "content must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/pending", get(list_pending))
        .route("/api/admin/posts/{id}/approve", post(approve_post))
        .route("/api/admin/posts/{id}/reject", post(reject_post))
        .route("/api/admin/articles", post(create_article))
        .route("/api/admin/articles/{id}", delete(delete_article))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/stats", get(stats))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn article_input() -> CreateResearchArticle {
        CreateResearchArticle {
            title: "Drip irrigation under drought".to_string(),
            abstract_text: "Field study across three seasons.".to_string(),
            author_name: "Dr. Mensah".to_string(),
            content: "Methods and findings.".to_string(),
            tags: vec!["irrigation".to_string()],
            is_premium: true,
            download_url: None,
        }
    }

    #[test]
    fn valid_article_passes() {
        assert!(validate_article(&article_input()).is_ok());
    }

    #[test]
    fn blank_abstract_rejected() {
        let mut input = article_input();
        input.abstract_text = "   ".to_string();

        let err = validate_article(&input).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn empty_title_rejected() {
        let mut input = article_input();
        input.title = String::new();

        assert!(validate_article(&input).is_err());
    }
}
