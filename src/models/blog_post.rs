//! Blog post model and the moderation workflow.
//!
//! Posts move through `draft → pending → published`; rejecting a pending
//! post sets it back to `draft` rather than introducing a separate rejected
//! state, so a rejected post is indistinguishable from one never submitted.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Publication status of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Pending,
    Published,
}

/// Admin decision on a pending post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    /// Status a pending post transitions to under this action.
    pub fn target_status(self) -> PostStatus {
        match self {
            ModerationAction::Approve => PostStatus::Published,
            ModerationAction::Reject => PostStatus::Draft,
        }
    }
}

/// Blog post record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a new blog post.
///
/// The author picks the initial status; self-publishing bypasses review.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: PostStatus,
}

impl crate::filter::Searchable for BlogPost {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.excerpt]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl BlogPost {
    /// Check if this post is visible in public listings.
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch blog post by id")?;

        Ok(post)
    }

    /// List published posts, newest first.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE status = 'published' ORDER BY created DESC",
        )
        .fetch_all(pool)
        .await
        .context("failed to list published posts")?;

        Ok(posts)
    }

    /// List posts awaiting moderation, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT * FROM blog_posts WHERE status = 'pending' ORDER BY created ASC",
        )
        .fetch_all(pool)
        .await
        .context("failed to list pending posts")?;

        Ok(posts)
    }

    /// Distinct tags across published posts.
    pub async fn published_tags(pool: &PgPool) -> Result<Vec<String>> {
        let tags: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT unnest(tags) FROM blog_posts WHERE status = 'published' ORDER BY 1",
        )
        .fetch_all(pool)
        .await
        .context("failed to list published tags")?;

        Ok(tags)
    }

    /// Create a new post.
    pub async fn create(
        pool: &PgPool,
        author_id: Uuid,
        author_name: &str,
        input: CreateBlogPost,
    ) -> Result<Self> {
        let id = Uuid::now_v7();

        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (id, title, content, excerpt, author_id, author_name, image_url, tags, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.excerpt)
        .bind(author_id)
        .bind(author_name)
        .bind(&input.image_url)
        .bind(&input.tags)
        .bind(input.status)
        .fetch_one(pool)
        .await
        .context("failed to create blog post")?;

        Ok(post)
    }

    /// Apply a moderation decision to a pending post.
    ///
    /// Only posts currently in `pending` are affected; returns the updated
    /// post, or None when no pending post with this id exists. A failed
    /// update propagates the error and leaves the row unchanged.
    pub async fn moderate(
        pool: &PgPool,
        id: Uuid,
        action: ModerationAction,
    ) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts
            SET status = $1, updated = NOW()
            WHERE id = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(action.target_status())
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to moderate blog post")?;

        Ok(post)
    }

    /// Count posts awaiting moderation.
    pub async fn count_pending(pool: &PgPool) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE status = 'pending'")
                .fetch_one(pool)
                .await
                .context("failed to count pending posts")?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn approve_targets_published() {
        assert_eq!(
            ModerationAction::Approve.target_status(),
            PostStatus::Published
        );
    }

    #[test]
    fn reject_targets_draft() {
        // Rejected posts fold back into drafts; there is no rejected state.
        assert_eq!(ModerationAction::Reject.target_status(), PostStatus::Draft);
    }

    #[test]
    fn status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Published).unwrap(),
            "\"published\""
        );
        let status: PostStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, PostStatus::Pending);
    }

    #[test]
    fn only_published_posts_are_public() {
        let mut post = BlogPost {
            id: Uuid::now_v7(),
            title: "Soil health basics".to_string(),
            content: "…".to_string(),
            excerpt: "…".to_string(),
            author_id: Uuid::nil(),
            author_name: "Ama".to_string(),
            image_url: None,
            tags: vec![],
            status: PostStatus::Draft,
            created: Utc::now(),
            updated: Utc::now(),
        };

        assert!(!post.is_published());
        post.status = PostStatus::Pending;
        assert!(!post.is_published());
        post.status = PostStatus::Published;
        assert!(post.is_published());
    }
}
