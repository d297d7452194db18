//! Per-plan limits and monthly quotas

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseError, Plan};

/// A numeric ceiling, or no ceiling at all.
///
/// Raw form is a non-negative count, or `-1` for unlimited. On the wire the
/// unlimited case is the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quota {
    /// At most this many
    Limited(u32),
    /// No ceiling
    Unlimited,
}

impl Quota {
    /// Raw sentinel for [`Quota::Unlimited`]
    pub const UNLIMITED_SENTINEL: i64 = -1;

    /// Parse the raw `-1 | n >= 0` form
    pub fn from_raw(raw: i64) -> Result<Self, ParseError> {
        match raw {
            Self::UNLIMITED_SENTINEL => Ok(Self::Unlimited),
            n if n >= 0 => u32::try_from(n)
                .map(Self::Limited)
                .map_err(|_| ParseError::Quota(raw)),
            _ => Err(ParseError::Quota(raw)),
        }
    }

    /// Raw form, `-1` when unlimited
    pub const fn as_raw(&self) -> i64 {
        match self {
            Self::Limited(n) => *n as i64,
            Self::Unlimited => Self::UNLIMITED_SENTINEL,
        }
    }

    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Whether one more use fits after `used` uses
    pub fn allows(&self, used: u64) -> bool {
        match self {
            Self::Limited(limit) => used < u64::from(*limit),
            Self::Unlimited => true,
        }
    }

    /// What is left after `used` uses, floored at zero
    pub fn remaining(&self, used: u64) -> Quota {
        match self {
            Self::Limited(limit) => {
                let left = u64::from(*limit).saturating_sub(used);
                // left <= limit, so it fits
                Self::Limited(left as u32)
            }
            Self::Unlimited => Self::Unlimited,
        }
    }
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

impl Serialize for Quota {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limited(n) => serializer.serialize_u32(*n),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for Quota {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawQuota {
            Count(i64),
            Label(String),
        }

        match RawQuota::deserialize(deserializer)? {
            RawQuota::Count(n) => Quota::from_raw(n).map_err(serde::de::Error::custom),
            RawQuota::Label(s) if s.eq_ignore_ascii_case("unlimited") => Ok(Quota::Unlimited),
            RawQuota::Label(s) => Err(serde::de::Error::custom(format!("invalid quota: {s}"))),
        }
    }
}

/// Which mockup room catalogue a plan sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomTier {
    /// The 10 basic rooms
    Basic10,
    /// The 40 standard rooms
    Standard40,
    /// Every room including premium packs
    All,
}

/// Resource limits and feature switches for one plan.
///
/// A disabled feature is always expressed by its boolean, never by a zero quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub max_artworks: Quota,
    pub max_wall_photos: Quota,
    pub max_projects: Quota,
    pub max_mockup_rooms: Quota,
    pub max_premium_rooms: Quota,
    pub room_tier: RoomTier,
    pub premium_rooms_access: bool,
    pub future_rooms: bool,
    pub high_res_export: bool,
    /// Whether PDF export is available at all
    pub pdf_export: bool,
    /// Monthly PDF export quota, meaningful only when `pdf_export` is set
    pub pdf_monthly_limit: Quota,
    pub designer_tools: bool,
    pub gallery_tools: bool,
    /// Active exhibitions
    pub exhibitions: Quota,
    pub client_folders: bool,
    pub gallery_dashboard: bool,
    pub multi_artist_collections: bool,
    pub custom_branding: bool,
    pub pdf_proposals: bool,
    pub public_gallery_pages: bool,
    pub priority_support: bool,
    pub early_access: bool,
}

const FREE: PlanLimits = PlanLimits {
    max_artworks: Quota::Limited(3),
    max_wall_photos: Quota::Limited(1),
    max_projects: Quota::Limited(1),
    max_mockup_rooms: Quota::Limited(10),
    max_premium_rooms: Quota::Limited(0),
    room_tier: RoomTier::Basic10,
    premium_rooms_access: false,
    future_rooms: false,
    high_res_export: false,
    pdf_export: false,
    pdf_monthly_limit: Quota::Limited(0),
    designer_tools: false,
    gallery_tools: false,
    exhibitions: Quota::Limited(0),
    client_folders: false,
    gallery_dashboard: false,
    multi_artist_collections: false,
    custom_branding: false,
    pdf_proposals: false,
    public_gallery_pages: false,
    priority_support: false,
    early_access: false,
};

const ARTIST: PlanLimits = PlanLimits {
    max_artworks: Quota::Limited(50),
    max_wall_photos: Quota::Limited(100),
    max_projects: Quota::Limited(100),
    max_mockup_rooms: Quota::Limited(40),
    room_tier: RoomTier::Standard40,
    ..FREE
};

const DESIGNER: PlanLimits = PlanLimits {
    max_artworks: Quota::Limited(100),
    max_wall_photos: Quota::Unlimited,
    max_projects: Quota::Unlimited,
    max_mockup_rooms: Quota::Unlimited,
    max_premium_rooms: Quota::Unlimited,
    room_tier: RoomTier::All,
    premium_rooms_access: true,
    high_res_export: true,
    pdf_export: true,
    pdf_monthly_limit: Quota::Unlimited,
    designer_tools: true,
    client_folders: true,
    custom_branding: true,
    pdf_proposals: true,
    ..FREE
};

const GALLERY: PlanLimits = PlanLimits {
    max_artworks: Quota::Unlimited,
    pdf_monthly_limit: Quota::Limited(20),
    designer_tools: false,
    gallery_tools: true,
    exhibitions: Quota::Limited(3),
    gallery_dashboard: true,
    multi_artist_collections: true,
    public_gallery_pages: true,
    ..DESIGNER
};

const EVERYTHING: PlanLimits = PlanLimits {
    max_artworks: Quota::Unlimited,
    max_wall_photos: Quota::Unlimited,
    max_projects: Quota::Unlimited,
    max_mockup_rooms: Quota::Unlimited,
    max_premium_rooms: Quota::Unlimited,
    room_tier: RoomTier::All,
    premium_rooms_access: true,
    future_rooms: true,
    high_res_export: true,
    pdf_export: true,
    pdf_monthly_limit: Quota::Unlimited,
    designer_tools: true,
    gallery_tools: true,
    exhibitions: Quota::Unlimited,
    client_folders: true,
    gallery_dashboard: true,
    multi_artist_collections: true,
    custom_branding: true,
    pdf_proposals: true,
    public_gallery_pages: true,
    priority_support: true,
    early_access: true,
};

impl PlanLimits {
    /// Static limits for a plan
    pub const fn for_plan(plan: Plan) -> &'static PlanLimits {
        match plan {
            Plan::User => &FREE,
            Plan::Artist => &ARTIST,
            Plan::Designer => &DESIGNER,
            Plan::Gallery => &GALLERY,
            Plan::AllAccess | Plan::Admin => &EVERYTHING,
        }
    }
}
