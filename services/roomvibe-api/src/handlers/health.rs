//! Health check handlers

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use roomvibe_axum::request_environment;
use roomvibe_types::Environment;

use crate::handlers::flags::FlagsResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvResponse {
    /// Environment of this request
    pub environment: Environment,
    /// Environment the database guard selected for
    pub database_environment: Environment,
    pub database_guard_bypassed: bool,
    #[serde(flatten)]
    pub flags: FlagsResponse,
    pub version: &'static str,
}

/// Liveness probe - always returns OK if the service is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe - checks database connectivity
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, StatusCode> {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => Ok(Json(ReadyResponse {
            status: "ready",
            database: "connected",
        })),
        Err(e) => {
            tracing::error!(error = ?e, "Database health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// GET /api/health/env - resolved environment and flags, no secrets
pub async fn health_env(State(state): State<AppState>, headers: HeaderMap) -> Json<EnvResponse> {
    Json(EnvResponse {
        environment: request_environment(state.environment(), &headers),
        database_environment: state.config.database.environment,
        database_guard_bypassed: state.config.database.bypassed,
        flags: state.flags.current().into(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
