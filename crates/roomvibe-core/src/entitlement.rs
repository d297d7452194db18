//! Entitlement matrix and upgrade prompts
//!
//! For each plan, the gated features that still need an upgrade and the
//! cheapest plan that unlocks them. A feature missing from a plan's row is
//! already unlocked for that plan. Top plans have no row.

use serde::Serialize;

use roomvibe_types::{Feature, Plan};

use Feature::*;

const USER_UPGRADES: &[(Feature, Plan)] = &[
    (ArtworkSelection, Plan::Artist),
    (WatermarkRemoval, Plan::Artist),
    (PremiumRooms, Plan::Artist),
    (HighResExport, Plan::Artist),
    (PdfExport, Plan::Artist),
    (DesignerTools, Plan::Designer),
    (GalleryTools, Plan::Gallery),
    (Exhibitions, Plan::Gallery),
    (UnlimitedExhibitions, Plan::AllAccess),
    (UnlimitedPdf, Plan::AllAccess),
];

const ARTIST_UPGRADES: &[(Feature, Plan)] = &[
    (PremiumRooms, Plan::Designer),
    (HighResExport, Plan::Designer),
    (PdfExport, Plan::Designer),
    (DesignerTools, Plan::Designer),
    (GalleryTools, Plan::Gallery),
    (Exhibitions, Plan::Gallery),
    (UnlimitedExhibitions, Plan::AllAccess),
    (UnlimitedPdf, Plan::AllAccess),
];

const DESIGNER_UPGRADES: &[(Feature, Plan)] = &[
    (GalleryTools, Plan::Gallery),
    (Exhibitions, Plan::Gallery),
    (UnlimitedExhibitions, Plan::AllAccess),
    (UnlimitedPdf, Plan::AllAccess),
];

const GALLERY_UPGRADES: &[(Feature, Plan)] = &[
    (DesignerTools, Plan::AllAccess),
    (UnlimitedExhibitions, Plan::AllAccess),
    (UnlimitedPdf, Plan::AllAccess),
];

/// The upgrade row for a plan
pub const fn upgrades_for(plan: Plan) -> &'static [(Feature, Plan)] {
    match plan {
        Plan::User => USER_UPGRADES,
        Plan::Artist => ARTIST_UPGRADES,
        Plan::Designer => DESIGNER_UPGRADES,
        Plan::Gallery => GALLERY_UPGRADES,
        Plan::AllAccess | Plan::Admin => &[],
    }
}

/// Minimum plan that unlocks `feature` for someone on `plan`.
///
/// `None` when the feature is already unlocked or the plan is already top tier.
pub fn recommended_upgrade(plan: Plan, feature: Feature) -> Option<Plan> {
    if plan.is_top() {
        return None;
    }
    upgrades_for(plan)
        .iter()
        .find(|(f, _)| *f == feature)
        .map(|(_, required)| *required)
}

/// User-facing upgrade prompt for a feature
pub fn upgrade_message(feature: Feature, recommended: Plan) -> String {
    let plan = recommended.display_name();
    match feature {
        PremiumRooms => format!(
            "Premium mockup rooms (100+) are available on the {plan} plan and above. Upgrade to access all rooms."
        ),
        HighResExport => format!(
            "High-resolution exports (3000px) are available on the {plan} plan and above. Upgrade to download professional-quality images."
        ),
        PdfExport => format!(
            "PDF exports are available on the {plan} plan and above. Upgrade to create professional PDF visualizations."
        ),
        GalleryTools => format!(
            "Gallery tools (exhibitions, multi-art walls) are available on the {plan} plan and above."
        ),
        Exhibitions => format!("Virtual exhibitions are available on the {plan} plan and above."),
        UnlimitedExhibitions => format!(
            "You've reached your exhibition limit. Upgrade to {plan} for unlimited exhibitions."
        ),
        UnlimitedPdf => format!(
            "You've reached your monthly PDF export limit. Upgrade to {plan} for unlimited PDF exports."
        ),
        DesignerTools => {
            format!("Designer Studio tools are available on the {plan} plan and above.")
        }
        ArtworkSelection => format!(
            "Full artwork selection is available on the {plan} plan and above. Upgrade to explore all artwork options!"
        ),
        WatermarkRemoval => format!(
            "Remove watermarks and unlock professional features on the {plan} plan and above."
        ),
    }
}

/// Upgrade prompt for a raw feature key, with a generic fallback for
/// keys outside the known set
pub fn upgrade_message_for_key(key: &str, recommended: Plan) -> String {
    match key.parse::<Feature>() {
        Ok(feature) => upgrade_message(feature, recommended),
        Err(_) => format!(
            "This feature requires the {} plan or higher.",
            recommended.display_name()
        ),
    }
}

/// Resolved entitlement for one (plan, feature) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementCheck {
    pub feature: Feature,
    pub current_plan: Plan,
    /// Whether the feature is unlocked
    pub allowed: bool,
    /// Plan to upgrade to when locked
    pub required_plan: Option<Plan>,
    /// Upgrade prompt when locked
    pub message: Option<String>,
}

/// Resolve the entitlement for a plan and feature
pub fn check(plan: Plan, feature: Feature) -> EntitlementCheck {
    let required_plan = recommended_upgrade(plan, feature);
    EntitlementCheck {
        feature,
        current_plan: plan,
        allowed: required_plan.is_none(),
        required_plan,
        message: required_plan.map(|required| upgrade_message(feature, required)),
    }
}
