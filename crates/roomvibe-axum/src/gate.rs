//! Feature-flag gates
//!
//! Each gate re-reads the flags on every request and answers 503 with a
//! structured body when its feature is switched off.
//!
//! `roomvibe-api` mounts the gallery and payments gates.
//! [`FeatureGate::PublicExhibitions`] is for downstream routers that serve
//! public exhibition pages; this workspace serves none.
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//! use roomvibe_axum::{enforce_gate, FeatureGate, FlagSource};
//!
//! let gallery = Router::new()
//!     .route("/api/gallery", get(list))
//!     .layer(from_fn_with_state(
//!         (FeatureGate::Gallery, FlagSource::from_env()),
//!         enforce_gate,
//!     ));
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use roomvibe_core::FeatureFlags;

/// Where gates read the flags from
#[derive(Clone)]
pub struct FlagSource(Arc<dyn Fn() -> FeatureFlags + Send + Sync>);

impl FlagSource {
    /// Read the process environment on every call
    pub fn from_env() -> Self {
        Self(Arc::new(FeatureFlags::from_env))
    }

    /// Always answer with the same flags
    pub fn fixed(flags: FeatureFlags) -> Self {
        Self(Arc::new(move || flags))
    }

    pub fn current(&self) -> FeatureFlags {
        (self.0)()
    }
}

impl std::fmt::Debug for FlagSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FlagSource").field(&self.current()).finish()
    }
}

/// A switchable area of the product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureGate {
    Gallery,
    PublicExhibitions,
    Payments,
}

/// Body of a gate rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateRejection {
    pub error: &'static str,
    pub code: &'static str,
    pub message: &'static str,
    pub feature: &'static str,
}

impl FeatureGate {
    pub fn is_open(self, flags: &FeatureFlags) -> bool {
        match self {
            Self::Gallery => flags.is_gallery_enabled(),
            Self::PublicExhibitions => flags.is_public_exhibitions_enabled(),
            Self::Payments => flags.is_payments_available(),
        }
    }

    pub fn feature_key(self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::PublicExhibitions => "exhibition_public",
            Self::Payments => "payments",
        }
    }

    pub fn rejection(self) -> GateRejection {
        match self {
            Self::Gallery => GateRejection {
                error: "Feature not available",
                code: "FEATURE_DISABLED",
                message: "The Gallery feature is currently being prepared for launch. Please check back soon.",
                feature: self.feature_key(),
            },
            Self::PublicExhibitions => GateRejection {
                error: "Feature not available",
                code: "FEATURE_DISABLED",
                message: "Public exhibitions are currently unavailable. Please check back soon.",
                feature: self.feature_key(),
            },
            Self::Payments => GateRejection {
                error: "Payments not available",
                code: "PAYMENTS_DISABLED",
                message: "Payment processing is currently disabled.",
                feature: self.feature_key(),
            },
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, Json(self)).into_response()
    }
}

/// Middleware: pass the request through only when the gate is open
pub async fn enforce_gate(
    State((gate, flags)): State<(FeatureGate, FlagSource)>,
    request: Request,
    next: Next,
) -> Response {
    if gate.is_open(&flags.current()) {
        return next.run(request).await;
    }

    tracing::debug!(feature = gate.feature_key(), path = %request.uri().path(), "feature gate closed");
    metrics::counter!("feature_gate_rejections_total", "feature" => gate.feature_key())
        .increment(1);
    gate.rejection().into_response()
}
