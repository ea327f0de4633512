//! Profile model and CRUD operations.

use anyhow::{Context, Result};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Subscription level controlling premium-content access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

/// Profile record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub pass: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub role: Role,
    pub subscription_tier: Tier,
    pub created: DateTime<Utc>,
}

/// Input for creating a new profile.
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Input for updating a profile's editable fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

impl Profile {
    /// Check if this profile has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Display name, falling back to the email local part.
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch profile by id")?;

        Ok(profile)
    }

    /// Find a profile by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .context("failed to fetch profile by email")?;

        Ok(profile)
    }

    /// Create a new profile with role `user` and tier `free`.
    pub async fn create(pool: &PgPool, input: CreateProfile) -> Result<Self> {
        let id = Uuid::now_v7();
        let pass = hash_password(&input.password)?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, email, pass, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.email)
        .bind(&pass)
        .bind(&input.full_name)
        .fetch_one(pool)
        .await
        .context("failed to create profile")?;

        Ok(profile)
    }

    /// Update a profile's editable fields.
    pub async fn update(pool: &PgPool, id: Uuid, input: UpdateProfile) -> Result<Option<Self>> {
        // Build dynamic update query
        let mut query = String::from("UPDATE profiles SET ");
        let mut params: Vec<String> = Vec::new();
        let mut param_idx = 1;

        if input.full_name.is_some() {
            params.push(format!("full_name = ${param_idx}"));
            param_idx += 1;
        }
        if input.avatar_url.is_some() {
            params.push(format!("avatar_url = ${param_idx}"));
            param_idx += 1;
        }
        if input.bio.is_some() {
            params.push(format!("bio = ${param_idx}"));
            param_idx += 1;
        }
        if input.website.is_some() {
            params.push(format!("website = ${param_idx}"));
            param_idx += 1;
        }
        if input.location.is_some() {
            params.push(format!("location = ${param_idx}"));
            param_idx += 1;
        }

        if params.is_empty() {
            // Nothing to update, just return the profile
            return Self::find_by_id(pool, id).await;
        }

        query.push_str(&params.join(", "));
        query.push_str(&format!(" WHERE id = ${param_idx} RETURNING *"));

        let mut query_builder = sqlx::query_as::<_, Profile>(&query);

        if let Some(ref full_name) = input.full_name {
            query_builder = query_builder.bind(full_name);
        }
        if let Some(ref avatar_url) = input.avatar_url {
            query_builder = query_builder.bind(avatar_url);
        }
        if let Some(ref bio) = input.bio {
            query_builder = query_builder.bind(bio);
        }
        if let Some(ref website) = input.website {
            query_builder = query_builder.bind(website);
        }
        if let Some(ref location) = input.location {
            query_builder = query_builder.bind(location);
        }
        query_builder = query_builder.bind(id);

        let profile = query_builder
            .fetch_optional(pool)
            .await
            .context("failed to update profile")?;

        Ok(profile)
    }

    /// List all profiles, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let profiles = sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY created DESC")
            .fetch_all(pool)
            .await
            .context("failed to list profiles")?;

        Ok(profiles)
    }

    /// Count all profiles.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await
            .context("failed to count profiles")?;

        Ok(count)
    }

    /// Count profiles with a premium subscription.
    pub async fn count_premium(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM profiles WHERE subscription_tier = 'premium'",
        )
        .fetch_one(pool)
        .await
        .context("failed to count premium profiles")?;

        Ok(count)
    }

    /// Verify a password against this profile's hash.
    pub fn verify_password(&self, password: &str) -> bool {
        if self.pass.is_empty() {
            return false;
        }

        let Ok(parsed_hash) = PasswordHash::new(&self.pass) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
