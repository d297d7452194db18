//! Subscription plan types

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Subscription plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free plan
    #[serde(alias = "free")]
    User,
    /// Artist - €9/mo
    Artist,
    /// Designer - €29/mo
    Designer,
    /// Gallery - €49/mo
    Gallery,
    /// All-Access - €79/mo, everything unlocked
    #[serde(alias = "all-access")]
    AllAccess,
    /// Staff accounts, everything unlocked
    Admin,
}

impl Plan {
    /// Every plan, lowest tier first
    pub const ALL: [Plan; 6] = [
        Self::User,
        Self::Artist,
        Self::Designer,
        Self::Gallery,
        Self::AllAccess,
        Self::Admin,
    ];

    /// Plans a customer can subscribe to
    pub const PURCHASABLE: [Plan; 5] = [
        Self::User,
        Self::Artist,
        Self::Designer,
        Self::Gallery,
        Self::AllAccess,
    ];

    /// Wire identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Artist => "artist",
            Self::Designer => "designer",
            Self::Gallery => "gallery",
            Self::AllAccess => "allaccess",
            Self::Admin => "admin",
        }
    }

    /// Human-readable name shown in upgrade prompts
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::User => "Free",
            Self::Artist => "Artist",
            Self::Designer => "Designer",
            Self::Gallery => "Gallery",
            Self::AllAccess => "All-Access",
            Self::Admin => "Admin",
        }
    }

    /// Monthly price in euro cents. `None` for plans that are not sold.
    pub const fn monthly_price_cents(&self) -> Option<u32> {
        match self {
            Self::User => Some(0),
            Self::Artist => Some(900),
            Self::Designer => Some(2_900),
            Self::Gallery => Some(4_900),
            Self::AllAccess => Some(7_900),
            Self::Admin => None,
        }
    }

    /// Tier rank. `AllAccess` and `Admin` share the top rank.
    pub const fn rank(&self) -> u8 {
        match self {
            Self::User => 0,
            Self::Artist => 1,
            Self::Designer => 2,
            Self::Gallery => 3,
            Self::AllAccess | Self::Admin => 4,
        }
    }

    /// Whether nothing can be upgraded to from this plan
    pub const fn is_top(&self) -> bool {
        matches!(self, Self::AllAccess | Self::Admin)
    }

    /// Strict tier comparison. Top plans are incomparable with each other.
    pub const fn outranks(&self, other: Plan) -> bool {
        if other.is_top() {
            return false;
        }
        self.rank() > other.rank()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" | "free" => Ok(Self::User),
            "artist" => Ok(Self::Artist),
            "designer" => Ok(Self::Designer),
            "gallery" => Ok(Self::Gallery),
            "allaccess" | "all-access" | "all_access" => Ok(Self::AllAccess),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseError::Plan(s.to_string())),
        }
    }
}
