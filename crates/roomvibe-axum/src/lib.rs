//! RoomVibe Axum Integration
//!
//! Axum middleware and extractors shared by RoomVibe services.
//!
//! # Overview
//!
//! - **Extractors**: `RequireAuth`, `MaybeAuth`, `RequireAdmin`, `RequestHost`
//! - **Middleware**: `AuthLayer` for session authentication, `enforce_gate`
//!   for feature-flag gates
//!
//! # Quick Start
//!
//! ```ignore
//! use roomvibe_axum::{AuthLayer, RequireAuth, TokenVerifier};
//! use axum::{Router, routing::get};
//!
//! async fn protected_handler(auth: RequireAuth) -> String {
//!     format!("Hello, user {} on {}!", auth.user_id, auth.plan)
//! }
//!
//! let app = Router::new()
//!     .route("/api/protected", get(protected_handler))
//!     .layer(AuthLayer::new(TokenVerifier::new(secret), users));
//! ```

pub mod context;
pub mod error;
pub mod extractors;
pub mod gate;
pub mod host;
pub mod layer;
pub mod token;

// Re-export primary types
pub use context::{AuthContext, Role};
pub use error::AuthError;
pub use extractors::{AuthContextExt, MaybeAuth, RequireAdmin, RequireAuth};
pub use gate::{enforce_gate, FeatureGate, FlagSource, GateRejection};
pub use host::{request_environment, request_host, RequestHost};
pub use layer::{authenticate, AuthLayer, AuthService};
pub use token::{SessionClaims, TokenVerifier};
