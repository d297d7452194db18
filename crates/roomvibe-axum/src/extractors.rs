//! Handler extractors over the session resolved by [`AuthLayer`](crate::AuthLayer).
//!
//! ```ignore
//! async fn pdf_status(auth: RequireAuth) -> String {
//!     format!("{} is on {}", auth.user_id, auth.plan)
//! }
//!
//! async fn pricing(MaybeAuth(session): MaybeAuth) -> String {
//!     session.map_or("guest".into(), |ctx| ctx.plan.to_string())
//! }
//! ```

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::context::AuthContext;
use crate::error::AuthError;

/// Request extension carrying the resolved session
#[derive(Debug, Clone)]
pub struct AuthContextExt(pub AuthContext);

fn session(parts: &Parts) -> Option<AuthContext> {
    parts
        .extensions
        .get::<AuthContextExt>()
        .map(|AuthContextExt(ctx)| ctx.clone())
}

/// A signed-in account; 401 without one
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

/// The account if signed in, `None` for guests
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthContext>);

/// A signed-in admin; 403 for everyone else
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

impl Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &AuthContext {
        &self.0
    }
}

impl Deref for RequireAdmin {
    type Target = AuthContext;

    fn deref(&self) -> &AuthContext {
        &self.0
    }
}

impl Deref for MaybeAuth {
    type Target = Option<AuthContext>;

    fn deref(&self) -> &Option<AuthContext> {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, AuthError> {
        session(parts).map(Self).ok_or(AuthError::Unauthenticated)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session(parts)))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, AuthError> {
        let ctx = session(parts).ok_or(AuthError::Unauthenticated)?;
        if !ctx.is_admin() {
            return Err(AuthError::InsufficientRole);
        }
        Ok(Self(ctx))
    }
}
