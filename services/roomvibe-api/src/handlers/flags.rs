//! Feature flag handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use roomvibe_core::FeatureFlags;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagsResponse {
    #[serde(flatten)]
    pub flags: FeatureFlags,
    pub payments_available: bool,
}

impl From<FeatureFlags> for FlagsResponse {
    fn from(flags: FeatureFlags) -> Self {
        Self {
            payments_available: flags.is_payments_available(),
            flags,
        }
    }
}

/// GET /api/feature-flags
pub async fn feature_flags(State(state): State<AppState>) -> Json<FlagsResponse> {
    Json(state.flags.current().into())
}
