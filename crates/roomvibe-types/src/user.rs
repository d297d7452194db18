//! User types

use serde::{Deserialize, Serialize};

use crate::Plan;

/// Unique user identifier (the `users.id` serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i32);

impl UserId {
    /// Parse a user ID from a string
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self(s.trim().parse()?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Subscription status values that still grant the stored plan
const ENTITLED_STATUSES: [&str; 2] = ["active", "free"];

/// The subscription-related columns of a user account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionProfile {
    pub is_admin: bool,
    /// `active`, `free`, `past_due`, `canceled`, ... (unset reads as `free`)
    pub status: Option<String>,
    /// Stored plan identifier (unset reads as `user`)
    pub plan: Option<String>,
    pub artist_access: bool,
    pub designer_access: bool,
    pub gallery_access: bool,
}

impl SubscriptionProfile {
    /// Resolve the plan the account is actually entitled to.
    ///
    /// Admins always get `admin`. A lapsed subscription drops to `user`.
    /// Holding all three role entitlements counts as `allaccess`. Unknown
    /// plan strings drop to `user`, and `admin` can never come from the
    /// stored plan column.
    pub fn effective_plan(&self) -> Plan {
        if self.is_admin {
            return Plan::Admin;
        }

        let status = self.status.as_deref().unwrap_or("free");
        if !ENTITLED_STATUSES.contains(&status) {
            return Plan::User;
        }

        if self.artist_access && self.designer_access && self.gallery_access {
            return Plan::AllAccess;
        }

        match self.plan.as_deref().unwrap_or("user").parse::<Plan>() {
            Ok(Plan::Admin) | Err(_) => Plan::User,
            Ok(plan) => plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(status: Option<&str>, plan: Option<&str>) -> SubscriptionProfile {
        SubscriptionProfile {
            status: status.map(String::from),
            plan: plan.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_to_user() {
        assert_eq!(SubscriptionProfile::default().effective_plan(), Plan::User);
    }

    #[test]
    fn test_active_plan_is_kept() {
        assert_eq!(
            profile(Some("active"), Some("designer")).effective_plan(),
            Plan::Designer
        );
        assert_eq!(
            profile(None, Some("gallery")).effective_plan(),
            Plan::Gallery
        );
    }

    #[test]
    fn test_lapsed_subscription_drops_to_user() {
        assert_eq!(
            profile(Some("past_due"), Some("gallery")).effective_plan(),
            Plan::User
        );
        assert_eq!(
            profile(Some("canceled"), Some("artist")).effective_plan(),
            Plan::User
        );
    }

    #[test]
    fn test_admin_flag_wins() {
        let p = SubscriptionProfile {
            is_admin: true,
            status: Some("canceled".into()),
            ..Default::default()
        };
        assert_eq!(p.effective_plan(), Plan::Admin);
    }

    #[test]
    fn test_admin_plan_column_is_not_trusted() {
        assert_eq!(profile(Some("active"), Some("admin")).effective_plan(), Plan::User);
        assert_eq!(profile(Some("active"), Some("platinum")).effective_plan(), Plan::User);
    }

    #[test]
    fn test_all_role_entitlements_mean_allaccess() {
        let p = SubscriptionProfile {
            status: Some("active".into()),
            plan: Some("artist".into()),
            artist_access: true,
            designer_access: true,
            gallery_access: true,
            ..Default::default()
        };
        assert_eq!(p.effective_plan(), Plan::AllAccess);
    }

    #[test]
    fn test_user_id_parse() {
        assert_eq!(UserId::parse("42").unwrap(), UserId(42));
        assert!(UserId::parse("abc").is_err());
    }
}
