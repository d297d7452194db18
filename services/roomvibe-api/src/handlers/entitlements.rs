//! Entitlement lookup handlers

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use roomvibe_axum::RequireAuth;
use roomvibe_core::entitlement::{self, EntitlementCheck};
use roomvibe_types::{Feature, Plan, PlanLimits, Quota};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct UpgradeQuery {
    pub feature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsResponse {
    pub effective_plan: Plan,
    pub limits: PlanLimits,
}

/// GET /api/entitlements/upgrade?feature=..
#[instrument(skip(auth), fields(user_id = %auth.user_id, plan = %auth.plan))]
pub async fn upgrade_for_feature(
    auth: RequireAuth,
    Query(query): Query<UpgradeQuery>,
) -> ApiResult<Json<EntitlementCheck>> {
    let feature: Feature = query
        .feature
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown feature: {}", query.feature)))?;

    Ok(Json(entitlement::check(auth.plan, feature)))
}

/// GET /api/entitlements/limits
pub async fn plan_limits(auth: RequireAuth) -> Json<LimitsResponse> {
    Json(LimitsResponse {
        effective_plan: auth.plan,
        limits: *auth.limits(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntitlementsResponse {
    pub gallery_tools: EntitlementCheck,
    pub exhibitions: EntitlementCheck,
    pub exhibition_limit: Quota,
}

/// GET /api/gallery/entitlements (behind the gallery gate)
pub async fn gallery_entitlements(auth: RequireAuth) -> Json<GalleryEntitlementsResponse> {
    Json(GalleryEntitlementsResponse {
        gallery_tools: entitlement::check(auth.plan, Feature::GalleryTools),
        exhibitions: entitlement::check(auth.plan, Feature::Exhibitions),
        exhibition_limit: auth.limits().exhibitions,
    })
}
