//! Newsletter subscriber model.
//!
//! Append-only: rows are only ever inserted, and a duplicate email surfaces
//! as a uniqueness violation the caller maps to a distinct message.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Newsletter subscriber record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub subscribed: DateTime<Utc>,
}

impl Subscriber {
    /// Subscribe an email address.
    pub async fn create(pool: &PgPool, email: &str) -> Result<Self> {
        let id = Uuid::now_v7();

        let subscriber = sqlx::query_as::<_, Subscriber>(
            r#"
            INSERT INTO newsletter_subscribers (id, email)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_one(pool)
        .await
        .context("failed to create newsletter subscriber")?;

        Ok(subscriber)
    }

    /// Count all subscribers.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(pool)
            .await
            .context("failed to count subscribers")?;

        Ok(count)
    }
}
