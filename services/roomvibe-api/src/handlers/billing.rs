//! Plan catalogue handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use roomvibe_core::PlanEntry;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub currency: &'static str,
    pub plans: Vec<PlanEntry>,
}

/// GET /api/billing/plans
pub async fn list_plans(State(state): State<AppState>) -> Json<PlansResponse> {
    Json(PlansResponse {
        currency: "eur",
        plans: state.registry.entries().to_vec(),
    })
}
