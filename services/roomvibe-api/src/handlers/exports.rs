//! Metered PDF export handlers

use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

use roomvibe_axum::{request_environment, RequireAuth};
use roomvibe_core::{ExportReceipt, ExportStatus, UsageError};
use roomvibe_types::Plan;

use crate::error::{ApiError, ApiResult};
use crate::handlers::shared::{record_op_duration, record_pdf_rejection};
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfStatusResponse {
    #[serde(flatten)]
    pub status: ExportStatus,
    pub effective_plan: Plan,
}

#[derive(Debug, Serialize)]
pub struct PdfTrackResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: ExportReceipt,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/exports/pdf/status
#[instrument(skip(state, auth, headers), fields(user_id = %auth.user_id, plan = %auth.plan))]
pub async fn pdf_status(
    State(state): State<AppState>,
    auth: RequireAuth,
    headers: HeaderMap,
) -> ApiResult<Json<PdfStatusResponse>> {
    let start = Instant::now();

    let result = state.exports.status(auth.user_id, auth.limits()).await;
    record_op_duration("pdf_status", start, result.is_ok());

    let status = result.map_err(|e| {
        ApiError::from_usage(
            e,
            auth.plan,
            "Failed to check PDF export status",
            request_environment(state.environment(), &headers),
        )
    })?;

    Ok(Json(PdfStatusResponse {
        status,
        effective_plan: auth.plan,
    }))
}

/// POST /api/exports/pdf/track
#[instrument(skip(state, auth, headers), fields(user_id = %auth.user_id, plan = %auth.plan))]
pub async fn track_pdf(
    State(state): State<AppState>,
    auth: RequireAuth,
    headers: HeaderMap,
) -> ApiResult<Json<PdfTrackResponse>> {
    let start = Instant::now();

    let result = state.exports.commit(auth.user_id, auth.limits()).await;
    record_op_duration("pdf_track", start, result.is_ok());

    match result {
        Ok(receipt) => {
            metrics::counter!("pdf_exports_recorded_total").increment(1);
            Ok(Json(PdfTrackResponse {
                success: true,
                receipt,
            }))
        }
        Err(e) => {
            match &e {
                UsageError::NotEntitled => record_pdf_rejection("not_entitled"),
                UsageError::QuotaExceeded { .. } => record_pdf_rejection("quota_exceeded"),
                UsageError::Database(_) => {}
            }
            Err(ApiError::from_usage(
                e,
                auth.plan,
                "Failed to track PDF export",
                request_environment(state.environment(), &headers),
            ))
        }
    }
}
