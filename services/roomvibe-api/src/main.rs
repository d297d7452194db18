//! RoomVibe API
//!
//! Plan entitlements, metered PDF exports and feature flags over HTTP.
//!
//! ## REST Endpoints
//!
//! - `GET /api/exports/pdf/status` - Monthly PDF export status
//! - `POST /api/exports/pdf/track` - Record one PDF export
//! - `GET /api/entitlements/upgrade?feature=..` - Upgrade needed for a feature
//! - `GET /api/entitlements/limits` - Limits of the caller's effective plan
//! - `GET /api/gallery/entitlements` - Gallery tools (gallery flag)
//! - `GET /api/billing/plans` - Purchasable plans (payments flag)
//! - `GET /api/feature-flags` - Current feature flags
//! - `GET /api/health/env` - Resolved environment, no secrets
//!
//! ## Health Endpoints
//!
//! - `GET /api/health` - Liveness probe
//! - `GET /api/ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod handlers;
mod routes;
mod state;
mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use roomvibe_axum::FlagSource;
use roomvibe_core::PlanRegistry;
use roomvibe_db::{create_pool_with_options, ensure_schema, Repositories};
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::telemetry::setup_metrics;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("roomvibe_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RoomVibe API");

    // Load configuration; refuses to start on a database guard violation
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        database = %config.database.masked(),
        database_environment = %config.database.environment,
        guard_bypassed = config.database.bypassed,
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create database pool
    let pool = create_pool_with_options(&config.database.url, &config.pool).await?;
    ensure_schema(&pool).await?;
    tracing::info!("Database pool created");

    let repos = Repositories::new(pool.clone());
    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    let state = AppState::new(
        config,
        pool,
        Arc::new(repos.usage),
        Arc::new(repos.users),
        PlanRegistry::from_env(),
        FlagSource::from_env(),
    );

    let app = build_router(state, metrics_handle);
    run_http_server(app, http_addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
