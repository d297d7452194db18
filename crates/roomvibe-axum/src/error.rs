//! Error types for auth middleware and extractors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Authentication and authorization errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session token on the request.
    #[error("Access denied. No token provided.")]
    Unauthenticated,

    /// Token failed verification or has expired.
    #[error("Invalid or expired token.")]
    InvalidToken,

    /// Token is valid but the account no longer exists.
    #[error("Account not found.")]
    UnknownAccount,

    /// User lacks required role.
    #[error("Insufficient permissions.")]
    InsufficientRole,

    /// Internal error during auth processing.
    #[error("internal auth error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::UnknownAccount => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::InsufficientRole => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::UnknownAccount => "UNKNOWN_ACCOUNT",
            Self::InsufficientRole => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "auth lookup failed");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}
