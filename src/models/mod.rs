//! Data models and CRUD operations.

mod blog_post;
mod profile;
mod research_article;
mod subscriber;

pub use blog_post::{BlogPost, CreateBlogPost, ModerationAction, PostStatus};
pub use profile::{CreateProfile, Profile, Role, Tier, UpdateProfile};
pub use research_article::{CreateResearchArticle, ResearchArticle};
pub use subscriber::Subscriber;

/// Check whether an error chain bottoms out in a SQL uniqueness violation.
///
/// Used to give duplicate inserts (newsletter emails, account emails) a
/// distinct response instead of a generic 500.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}
