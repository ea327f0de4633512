//! Integration tests for the pure request-path logic.
//!
//! These cover in-memory list filtering, the premium access gate, news
//! categorization, and moderation state transitions, all without touching
//! PostgreSQL or Redis.

use agrinews::access::can_access_premium;
use agrinews::filter::{self, Searchable};
use agrinews::models::{ModerationAction, PostStatus, Profile, Role, Tier};
use agrinews::services::news::{self, CATEGORIES};
use chrono::Utc;
use uuid::Uuid;

// ============================================================================
// Filter Tests
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Doc {
    title: String,
    body: String,
    tags: Vec<String>,
}

impl Doc {
    fn new(title: &str, body: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Searchable for Doc {
    fn haystacks(&self) -> Vec<&str> {
        vec![&self.title, &self.body]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

fn sample_docs() -> Vec<Doc> {
    vec![
        Doc::new("Drip irrigation basics", "Saving water", &["Irrigation"]),
        Doc::new("Soil health report", "Cover crops and irrigation", &["Soil"]),
        Doc::new("Market prices", "Maize futures", &["Economics"]),
    ]
}

#[test]
fn empty_search_and_tag_return_everything() {
    let docs = sample_docs();

    assert_eq!(filter::apply(docs.clone(), None, None), docs);
    assert_eq!(filter::apply(docs.clone(), Some(""), Some("")), docs);
    assert_eq!(filter::apply(docs.clone(), None, Some("All")), docs);
}

#[test]
fn search_is_case_insensitive_substring() {
    let results = filter::apply(sample_docs(), Some("IRRIGATION"), None);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Drip irrigation basics");
    assert_eq!(results[1].title, "Soil health report");
}

#[test]
fn tag_match_is_exact_and_case_sensitive() {
    let results = filter::apply(sample_docs(), None, Some("Soil"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Soil health report");

    // Lowercase does not match the stored "Soil" tag.
    assert!(filter::apply(sample_docs(), None, Some("soil")).is_empty());
    // Prefix of a tag is not a match either.
    assert!(filter::apply(sample_docs(), None, Some("Soi")).is_empty());
}

#[test]
fn search_and_tag_compose_as_and() {
    let results = filter::apply(sample_docs(), Some("irrigation"), Some("Soil"));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Soil health report");
}

#[test]
fn no_match_yields_empty_not_error() {
    assert!(filter::apply(sample_docs(), Some("blockchain"), None).is_empty());
}

#[test]
fn filtering_preserves_input_order() {
    let docs = vec![
        Doc::new("b wheat", "", &[]),
        Doc::new("a wheat", "", &[]),
        Doc::new("c wheat", "", &[]),
    ];

    let results = filter::apply(docs, Some("wheat"), None);
    let titles: Vec<&str> = results.iter().map(|d| d.title.as_str()).collect();

    assert_eq!(titles, ["b wheat", "a wheat", "c wheat"]);
}

// ============================================================================
// Access Gate Tests
// ============================================================================

fn profile(role: Role, tier: Tier) -> Profile {
    Profile {
        id: Uuid::now_v7(),
        email: "reader@example.com".to_string(),
        pass: String::new(),
        full_name: None,
        avatar_url: None,
        bio: None,
        website: None,
        location: None,
        role,
        subscription_tier: tier,
        created: Utc::now(),
    }
}

#[test]
fn free_content_is_open_to_everyone() {
    assert!(can_access_premium(None, false));
    assert!(can_access_premium(Some(&profile(Role::User, Tier::Free)), false));
}

#[test]
fn premium_content_requires_premium_tier_or_admin() {
    assert!(!can_access_premium(None, true));
    assert!(!can_access_premium(
        Some(&profile(Role::User, Tier::Free)),
        true
    ));
    assert!(can_access_premium(
        Some(&profile(Role::User, Tier::Premium)),
        true
    ));
    assert!(can_access_premium(
        Some(&profile(Role::Admin, Tier::Free)),
        true
    ));
}

// ============================================================================
// News Categorization Tests
// ============================================================================

#[test]
fn categorize_matches_known_keywords() {
    assert_eq!(news::categorize("Extreme weather hits farms", ""), "Climate");
    assert_eq!(news::categorize("New farm drone rollout", ""), "Technology");
    assert_eq!(news::categorize("Record harvest expected", ""), "Crops");
    assert_eq!(news::categorize("Dairy herd management", ""), "Livestock");
}

#[test]
fn categorize_defaults_to_policy() {
    assert_eq!(news::categorize("Village fair announced", ""), "Policy");
}

#[test]
fn categorize_checks_description_too() {
    assert_eq!(
        news::categorize("Morning briefing", "shifting climate patterns"),
        "Climate"
    );
}

#[test]
fn every_category_is_listed() {
    for title in ["weather", "drone", "subsidy", "harvest", "cattle"] {
        let category = news::categorize(title, "");
        assert!(
            CATEGORIES.contains(&category.as_str()),
            "unlisted category {category} for {title}"
        );
    }
}

// ============================================================================
// Moderation Transition Tests
// ============================================================================

#[test]
fn approve_publishes_and_reject_returns_to_draft() {
    assert_eq!(
        ModerationAction::Approve.target_status(),
        PostStatus::Published
    );
    assert_eq!(ModerationAction::Reject.target_status(), PostStatus::Draft);
}
