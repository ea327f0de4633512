//! Research article routes: catalog, gated reads, gated downloads.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::access::can_access_premium;
use crate::error::{AppError, AppResult};
use crate::filter;
use crate::models::{Profile, ResearchArticle};
use crate::routes::current_profile;
use crate::state::AppState;

/// Query parameters for the article listing.
#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    pub search: Option<String>,
}

/// An article as seen by a particular viewer.
///
/// `content` is withheld (abstract retained) when the access gate denies;
/// `can_access` lets the client render the premium badge and disable the
/// download button without a second request.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub author_name: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub is_premium: bool,
    pub has_download: bool,
    pub can_access: bool,
    pub created: chrono::DateTime<chrono::Utc>,
}

impl ArticleResponse {
    /// Render an article through the access gate for this viewer.
    fn for_viewer(article: ResearchArticle, viewer: Option<&Profile>) -> Self {
        let can_access = can_access_premium(viewer, article.is_premium);

        Self {
            id: article.id,
            title: article.title,
            abstract_text: article.abstract_text,
            author_name: article.author_name,
            content: can_access.then_some(article.content),
            tags: article.tags,
            is_premium: article.is_premium,
            has_download: article.download_url.is_some(),
            can_access,
            created: article.created,
        }
    }
}

/// Article listing response.
#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleResponse>,
    pub total: usize,
}

/// Download link response.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub download_url: String,
}

/// List all articles, newest first.
///
/// GET /api/research?search=
/// - The gate is recomputed per request; anonymous viewers see the catalog
///   with premium content withheld
async fn list_articles(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListArticlesQuery>,
) -> AppResult<Json<ArticleListResponse>> {
    let viewer = current_profile(&state, &session).await?;

    let articles = ResearchArticle::list(state.db()).await?;
    let articles = filter::apply(articles, query.search.as_deref(), None);

    let articles: Vec<ArticleResponse> = articles
        .into_iter()
        .map(|a| ArticleResponse::for_viewer(a, viewer.as_ref()))
        .collect();

    let total = articles.len();
    Ok(Json(ArticleListResponse { articles, total }))
}

/// Get a single article.
///
/// GET /api/research/{id}
async fn get_article(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ArticleResponse>> {
    let viewer = current_profile(&state, &session).await?;

    let article = ResearchArticle::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ArticleResponse::for_viewer(article, viewer.as_ref())))
}

/// Get the download link for an article's protected asset.
///
/// GET /api/research/{id}/download
/// - 403 when the gate denies, 404 when the article has no download
async fn download_article(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DownloadResponse>> {
    let viewer = current_profile(&state, &session).await?;

    let article = ResearchArticle::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !can_access_premium(viewer.as_ref(), article.is_premium) {
        return Err(AppError::Forbidden(
            "a premium subscription is required to download this article".to_string(),
        ));
    }

    let download_url = article.download_url.ok_or(AppError::NotFound)?;

    Ok(Json(DownloadResponse { download_url }))
}

/// Create the research router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/research", get(list_articles))
        .route("/api/research/{id}", get(get_article))
        .route("/api/research/{id}/download", get(download_article))
}
