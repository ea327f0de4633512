//! Aggregated news route.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::filter;
use crate::services::news::{self, NewsArticle};
use crate::state::AppState;

/// Query parameters for the news feed.
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// News feed response.
///
/// `fallback` is true when the upstream feed was unreachable and the demo
/// stories were served instead.
#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
    pub categories: Vec<String>,
    pub total: usize,
    pub fallback: bool,
}

/// Fetch the aggregated agriculture news feed.
///
/// GET /api/news?search=&category=
/// - Upstream failures degrade to the built-in demo stories rather than an
///   error response
async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> AppResult<Json<NewsResponse>> {
    let (articles, fallback) = match state.news().fetch().await {
        Ok(articles) => (articles, false),
        Err(err) => {
            tracing::warn!(error = %err, "news feed unavailable, serving fallback stories");
            (news::fallback_articles(), true)
        }
    };

    let articles = filter::apply(articles, query.search.as_deref(), query.category.as_deref());

    let total = articles.len();
    Ok(Json(NewsResponse {
        articles,
        categories: news::CATEGORIES.iter().map(ToString::to_string).collect(),
        total,
        fallback,
    }))
}

/// Create the news router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/news", get(list_news))
}
