//! Property-based tests for the entitlement matrix
//!
//! These tests verify the matrix invariants:
//! - A recommended plan always outranks the current plan
//! - Top plans never get a recommendation
//! - Lookups are pure
//! - Feature keys round-trip through their wire names

use proptest::prelude::*;
use roomvibe_core::entitlement::{check, recommended_upgrade, upgrade_message_for_key};
use roomvibe_core::parse_bool;
use roomvibe_types::{Feature, Plan, PlanLimits};

// ============================================================================
// Strategies
// ============================================================================

fn arb_plan() -> impl Strategy<Value = Plan> {
    prop::sample::select(Plan::ALL.to_vec())
}

fn arb_feature() -> impl Strategy<Value = Feature> {
    prop::sample::select(Feature::ALL.to_vec())
}

/// Keys that are not feature identifiers
fn arb_unknown_key() -> impl Strategy<Value = String> {
    "[a-z]{3,12}_[a-z]{2,6}".prop_filter("must not be a feature", |k| {
        k.parse::<Feature>().is_err()
    })
}

// ============================================================================
// Matrix invariants
// ============================================================================

proptest! {
    #[test]
    fn recommended_plan_outranks_current(plan in arb_plan(), feature in arb_feature()) {
        if let Some(required) = recommended_upgrade(plan, feature) {
            prop_assert!(
                required.outranks(plan),
                "{} -> {} for {}", plan, required, feature
            );
            prop_assert!(required != Plan::Admin);
        }
    }

    #[test]
    fn top_plans_never_upgrade(feature in arb_feature()) {
        prop_assert_eq!(recommended_upgrade(Plan::AllAccess, feature), None);
        prop_assert_eq!(recommended_upgrade(Plan::Admin, feature), None);
    }

    #[test]
    fn lookup_is_pure(plan in arb_plan(), feature in arb_feature()) {
        prop_assert_eq!(recommended_upgrade(plan, feature), recommended_upgrade(plan, feature));
        prop_assert_eq!(check(plan, feature), check(plan, feature));
    }

    #[test]
    fn check_agrees_with_recommendation(plan in arb_plan(), feature in arb_feature()) {
        let result = check(plan, feature);
        prop_assert_eq!(result.allowed, recommended_upgrade(plan, feature).is_none());
        prop_assert_eq!(result.allowed, result.message.is_none());
    }

    #[test]
    fn message_names_the_recommended_plan(plan in arb_plan(), feature in arb_feature()) {
        let result = check(plan, feature);
        if let (Some(required), Some(message)) = (result.required_plan, result.message) {
            prop_assert!(message.contains(required.display_name()), "{}", message);
        }
    }

    #[test]
    fn feature_wire_name_round_trips(feature in arb_feature()) {
        prop_assert_eq!(feature.as_str().parse::<Feature>().ok(), Some(feature));
    }

    #[test]
    fn unknown_key_gets_generic_message(key in arb_unknown_key(), plan in arb_plan()) {
        let msg = upgrade_message_for_key(&key, plan);
        prop_assert_eq!(
            msg,
            format!("This feature requires the {} plan or higher.", plan.display_name())
        );
    }

    #[test]
    fn unrecognized_bool_falls_back_to_default(raw in "[a-z]{2,8}x", default in any::<bool>()) {
        prop_assert_eq!(parse_bool(Some(&raw), default), default);
    }
}

// ============================================================================
// Matrix vs plan limits
// ============================================================================

#[test]
fn pdf_export_unlock_matches_plan_limits() {
    for plan in Plan::ALL {
        let unlocked = recommended_upgrade(plan, Feature::PdfExport).is_none();
        assert_eq!(
            unlocked,
            PlanLimits::for_plan(plan).pdf_export,
            "pdfExport mismatch for {plan}"
        );
    }
}

#[test]
fn artist_pdf_export_recommends_designer() {
    let result = check(Plan::Artist, Feature::PdfExport);
    assert!(!result.allowed);
    assert_eq!(result.required_plan, Some(Plan::Designer));
    assert!(result.message.unwrap().contains("Designer"));
}
