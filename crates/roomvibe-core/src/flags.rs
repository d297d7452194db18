//! Process-wide feature flags
//!
//! Every loosely-typed boolean in configuration goes through [`parse_bool`].
//! Each flag names its own default: content features fail open, payments
//! fail closed.

use serde::Serialize;

/// Gallery feature switch, default on
pub const GALLERY_FLAG: &str = "FEATURE_GALLERY_ENABLED";
/// Public exhibition pages switch, default on
pub const EXHIBITION_PUBLIC_FLAG: &str = "FEATURE_EXHIBITION_PUBLIC_ENABLED";
/// Payment provider integration switch, default off
pub const STRIPE_FLAG: &str = "STRIPE_ENABLED";
/// Payments switch, default off
pub const PAYMENTS_FLAG: &str = "PAYMENTS_ENABLED";

/// Parse a loosely-typed boolean.
///
/// Case-insensitive and trimmed: `true`/`1`/`yes`/`on` are true,
/// `false`/`0`/`no`/`off` are false. Anything else, including unset,
/// yields `default`.
pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}

/// Snapshot of the feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub gallery_enabled: bool,
    pub exhibition_public_enabled: bool,
    pub stripe_enabled: bool,
    pub payments_enabled: bool,
}

impl FeatureFlags {
    /// Read the flags through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str, default: bool| parse_bool(lookup(key).as_deref(), default);
        Self {
            gallery_enabled: flag(GALLERY_FLAG, true),
            exhibition_public_enabled: flag(EXHIBITION_PUBLIC_FLAG, true),
            stripe_enabled: flag(STRIPE_FLAG, false),
            payments_enabled: flag(PAYMENTS_FLAG, false),
        }
    }

    /// Read the flags from the process environment. Cheap enough to call per request.
    pub fn from_env() -> Self {
        Self::from_lookup(crate::config::process_env)
    }

    pub fn is_gallery_enabled(&self) -> bool {
        self.gallery_enabled
    }

    pub fn is_public_exhibitions_enabled(&self) -> bool {
        self.exhibition_public_enabled
    }

    /// Payments need both the provider and the payments switch
    pub fn is_payments_available(&self) -> bool {
        self.stripe_enabled && self.payments_enabled
    }
}
