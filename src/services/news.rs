//! Third-party news feed client.
//!
//! Fetches agricultural stories from the Guardian content-search API, maps
//! them into the local article shape, and classifies each into one of five
//! fixed categories by keyword. When the upstream call fails the caller gets
//! a small built-in fallback set instead of an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::Searchable;

/// The five fixed news categories.
pub const CATEGORIES: [&str; 5] = ["Policy", "Climate", "Technology", "Crops", "Livestock"];

/// A news story in the local shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: usize,
    pub title: String,
    pub description: String,
    pub category: String,
    pub source: String,
    pub published_at: String,
    pub url: String,
    pub image_url: String,
}

impl Searchable for NewsArticle {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }

    fn tags(&self) -> &[String] {
        std::slice::from_ref(&self.category)
    }
}

/// Guardian content-search response envelope.
#[derive(Debug, Deserialize)]
struct GuardianResponse {
    response: GuardianResults,
}

#[derive(Debug, Deserialize)]
struct GuardianResults {
    results: Vec<GuardianArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuardianArticle {
    web_title: String,
    web_publication_date: String,
    web_url: String,
    #[serde(default)]
    fields: Option<GuardianFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuardianFields {
    #[serde(default)]
    trail_text: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

/// Client for the upstream news search API.
#[derive(Clone)]
pub struct NewsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsClient {
    /// Create a new client with a 10 second request timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("failed to build news HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch and map the latest agricultural stories.
    pub async fn fetch(&self) -> Result<Vec<NewsArticle>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", "agriculture OR farming OR crops"),
                ("show-fields", "thumbnail,trailText"),
                ("page-size", "20"),
                ("order-by", "newest"),
                ("api-key", &self.api_key),
            ])
            .send()
            .await
            .context("news feed request failed")?
            .error_for_status()
            .context("news feed returned an error status")?;

        let payload: GuardianResponse = response
            .json()
            .await
            .context("failed to parse news feed response")?;

        let articles = payload
            .response
            .results
            .into_iter()
            .enumerate()
            .map(|(index, article)| {
                let fields = article.fields.unwrap_or(GuardianFields {
                    trail_text: None,
                    thumbnail: None,
                });
                let description = fields
                    .trail_text
                    .unwrap_or_else(|| "Read more about this agricultural development.".to_string());
                let category = categorize(&article.web_title, &description);

                NewsArticle {
                    id: index + 1,
                    title: article.web_title,
                    description,
                    category,
                    source: "The Guardian".to_string(),
                    published_at: article.web_publication_date,
                    url: article.web_url,
                    image_url: fields.thumbnail.unwrap_or_default(),
                }
            })
            .collect::<Vec<_>>();

        debug!(count = articles.len(), "news feed fetched");
        Ok(articles)
    }
}

/// Classify a story by the first keyword group matching its title+description.
///
/// Match is a plain lowercase substring check; groups are tried in a fixed
/// order and Policy is the default.
pub fn categorize(title: &str, description: &str) -> String {
    let text = format!("{title} {description}").to_lowercase();

    let groups: [(&str, &[&str]); 5] = [
        ("Climate", &["climate", "weather", "environment"]),
        ("Technology", &["technology", "drone", "ai", "digital"]),
        ("Policy", &["policy", "government", "regulation"]),
        ("Crops", &["crop", "harvest", "organic"]),
        ("Livestock", &["livestock", "cattle", "dairy"]),
    ];

    for (category, keywords) in groups {
        if keywords.iter().any(|k| text.contains(k)) {
            return category.to_string();
        }
    }

    "Policy".to_string()
}

/// Demo stories served when the upstream feed is unreachable.
pub fn fallback_articles() -> Vec<NewsArticle> {
    let now = chrono::Utc::now();
    let entries = [
        (
            "Agricultural Innovation Drives Food Security",
            "New technologies and farming methods are being developed to address global food security challenges.",
            "Technology",
            now,
        ),
        (
            "Climate Adaptation in Modern Farming",
            "Farmers worldwide are adapting their practices to cope with changing climate conditions.",
            "Climate",
            now - chrono::Duration::days(1),
        ),
        (
            "Sustainable Agriculture Practices Gain Momentum",
            "Increasing adoption of sustainable farming methods shows promise for environmental conservation.",
            "Policy",
            now - chrono::Duration::days(2),
        ),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (title, description, category, published))| NewsArticle {
            id: index + 1,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            source: "Demo Source".to_string(),
            published_at: published.to_rfc3339(),
            url: "#".to_string(),
            image_url: String::new(),
        })
        .collect()
}
