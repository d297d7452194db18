//! Error types for the RoomVibe API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use roomvibe_core::{entitlement, UsageError};
use roomvibe_types::{Environment, Feature, Plan, Quota};

/// Where upgrade prompts send the user
pub const UPGRADE_URL: &str = "/pricing";

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    NotEntitled {
        message: String,
        suggested_plan: Option<Plan>,
    },

    #[error(
        "You've reached your limit of {limit} PDF exports this month. Upgrade to All-Access for unlimited exports."
    )]
    QuotaExceeded { current: u64, limit: u32 },

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Persistence failure; `detail` is only set outside production
    #[error("{message}")]
    Persistence {
        message: &'static str,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Map a usage gate failure for an account on `plan`.
    ///
    /// Raw persistence detail is exposed only outside production.
    pub fn from_usage(
        err: UsageError,
        plan: Plan,
        message: &'static str,
        environment: Environment,
    ) -> Self {
        match err {
            UsageError::NotEntitled => {
                let check = entitlement::check(plan, Feature::PdfExport);
                Self::NotEntitled {
                    message: check
                        .message
                        .unwrap_or_else(|| "PDF export is not available on this plan.".to_string()),
                    suggested_plan: check.required_plan,
                }
            }
            UsageError::QuotaExceeded { current, limit } => Self::QuotaExceeded { current, limit },
            UsageError::Database(e) => {
                tracing::error!(error = %e, "usage persistence failed");
                Self::Persistence {
                    message,
                    detail: (!environment.is_production()).then(|| e.to_string()),
                }
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotEntitled { .. } | Self::QuotaExceeded { .. } => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEntitled { .. } => "NOT_ENTITLED",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Persistence { .. } => "INTERNAL_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::NotEntitled { suggested_plan, .. } => Some(json!({
                "suggestedPlan": suggested_plan,
                "upgradeUrl": UPGRADE_URL,
            })),
            Self::QuotaExceeded { current, limit } => Some(json!({
                "currentCount": current,
                "monthlyLimit": Quota::Limited(*limit),
                "suggestedPlan": Plan::AllAccess,
                "upgradeUrl": UPGRADE_URL,
            })),
            Self::Persistence { detail, .. } => detail.as_ref().map(|d| json!({ "detail": d })),
            Self::BadRequest(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
