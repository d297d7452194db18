//! HTTP router

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use roomvibe_axum::{enforce_gate, AuthLayer, FeatureGate};

use crate::handlers::{self, health, ready};
use crate::state::AppState;

pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Gallery routes, switched off with FEATURE_GALLERY_ENABLED
    let gallery_routes = Router::new()
        .route(
            "/gallery/entitlements",
            get(handlers::gallery_entitlements),
        )
        .layer(from_fn_with_state(
            (FeatureGate::Gallery, state.flags.clone()),
            enforce_gate,
        ));

    // Plan catalogue, only while payments are available
    let billing_routes = Router::new()
        .route("/billing/plans", get(handlers::list_plans))
        .layer(from_fn_with_state(
            (FeatureGate::Payments, state.flags.clone()),
            enforce_gate,
        ));

    let api = Router::new()
        // Metered exports
        .route("/exports/pdf/status", get(handlers::pdf_status))
        .route("/exports/pdf/track", post(handlers::track_pdf))
        // Entitlements
        .route("/entitlements/upgrade", get(handlers::upgrade_for_feature))
        .route("/entitlements/limits", get(handlers::plan_limits))
        .merge(gallery_routes)
        .merge(billing_routes)
        .layer(AuthLayer::new(state.verifier.clone(), state.users.clone()));

    // Public, never touches the session cookie
    let public = Router::new()
        .route("/feature-flags", get(handlers::feature_flags))
        .route("/health/env", get(handlers::health_env));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/ready", get(ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api", api.merge(public))
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}
