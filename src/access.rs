//! Premium-content access gate.
//!
//! A pure function of the viewer's profile and the content's premium flag,
//! recomputed on every request from a freshly fetched profile. The session
//! only stores the user id, so tier and role are never stale.

use crate::models::{Profile, Role, Tier};

/// Whether the viewer may read or download premium-flagged content.
///
/// Free content is open to everyone, including anonymous viewers. Premium
/// content requires a premium subscription or the admin role.
pub fn can_access_premium(viewer: Option<&Profile>, is_premium: bool) -> bool {
    if !is_premium {
        return true;
    }

    viewer.is_some_and(|p| p.subscription_tier == Tier::Premium || p.role == Role::Admin)
}
