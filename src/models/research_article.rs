//! Research article model and CRUD operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Research article record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResearchArticle {
    pub id: Uuid,
    pub title: String,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub author_name: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_premium: bool,
    pub download_url: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a new research article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResearchArticle {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_premium: bool,
    pub download_url: Option<String>,
}

impl crate::filter::Searchable for ResearchArticle {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.abstract_text]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl ResearchArticle {
    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let article =
            sqlx::query_as::<_, ResearchArticle>("SELECT * FROM research_articles WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .context("failed to fetch research article by id")?;

        Ok(article)
    }

    /// List all articles, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let articles = sqlx::query_as::<_, ResearchArticle>(
            "SELECT * FROM research_articles ORDER BY created DESC",
        )
        .fetch_all(pool)
        .await
        .context("failed to list research articles")?;

        Ok(articles)
    }

    /// Create a new article.
    pub async fn create(pool: &PgPool, input: CreateResearchArticle) -> Result<Self> {
        let id = Uuid::now_v7();

        let article = sqlx::query_as::<_, ResearchArticle>(
            r#"
            INSERT INTO research_articles (id, title, abstract, author_name, content, tags, is_premium, download_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.abstract_text)
        .bind(&input.author_name)
        .bind(&input.content)
        .bind(&input.tags)
        .bind(input.is_premium)
        .bind(&input.download_url)
        .fetch_one(pool)
        .await
        .context("failed to create research article")?;

        Ok(article)
    }

    /// Delete an article. Hard delete; admin-only at the route layer.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM research_articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete research article")?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all articles.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM research_articles")
            .fetch_one(pool)
            .await
            .context("failed to count research articles")?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn abstract_field_uses_wire_name() {
        let json = r#"{
            "title": "Cocoa yields under shade trees",
            "abstract": "A two-season field trial.",
            "author_name": "Dr. Mensah",
            "content": "Full text.",
            "is_premium": true,
            "download_url": null
        }"#;

        let input: CreateResearchArticle = serde_json::from_str(json).unwrap();
        assert_eq!(input.abstract_text, "A two-season field trial.");
        assert!(input.is_premium);
        assert!(input.tags.is_empty());
    }
}
