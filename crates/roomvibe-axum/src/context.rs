//! Authentication context types.
//!
//! The [`AuthContext`] struct contains the authenticated account and the
//! plan it is entitled to, as seen by request handlers.

use roomvibe_types::{Plan, PlanLimits, UserId};

/// Account role carried in the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Regular account.
    #[default]
    User,
    /// Administrator.
    Admin,
}

impl Role {
    /// Parse the token's role claim. Anything but `admin` is a regular user.
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(role) if role.eq_ignore_ascii_case("admin") => Self::Admin,
            _ => Self::User,
        }
    }
}

/// Authenticated account with its effective plan.
///
/// Populated by [`AuthLayer`](crate::AuthLayer) and read through the
/// extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// The authenticated account.
    pub user_id: UserId,
    /// The plan the account is currently entitled to.
    pub plan: Plan,
    /// Role from the session token.
    pub role: Role,
    /// Email from the session token, if present.
    pub email: Option<String>,
}

impl AuthContext {
    /// Create a context for a regular account.
    #[must_use]
    pub fn new(user_id: UserId, plan: Plan) -> Self {
        Self {
            user_id,
            plan,
            role: Role::User,
            email: None,
        }
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Limits of the effective plan.
    #[must_use]
    pub fn limits(&self) -> &'static PlanLimits {
        PlanLimits::for_plan(self.plan)
    }

    /// Check if the account is an admin, by role or by plan.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.plan == Plan::Admin
    }
}
