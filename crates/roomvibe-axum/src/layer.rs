//! Tower middleware layer for session authentication.
//!
//! The [`AuthLayer`] verifies the session token, loads the account's
//! subscription columns and stores an [`AuthContext`] in request extensions.
//! Requests without a token pass through untouched; handlers decide whether
//! authentication is required.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};

use roomvibe_db::UserRepository;
use roomvibe_types::UserId;

use crate::context::{AuthContext, Role};
use crate::error::AuthError;
use crate::extractors::AuthContextExt;
use crate::token::{extract_token, TokenVerifier};

/// Tower layer that authenticates requests.
#[derive(Clone)]
pub struct AuthLayer {
    verifier: TokenVerifier,
    users: Arc<dyn UserRepository>,
}

impl AuthLayer {
    /// Create a new auth layer.
    #[must_use]
    pub fn new(verifier: TokenVerifier, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            verifier: self.verifier.clone(),
            users: Arc::clone(&self.users),
        }
    }
}

/// The authentication service.
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    verifier: TokenVerifier,
    users: Arc<dyn UserRepository>,
}

/// Resolve the context for a token: verify, load the account, derive its plan.
pub async fn authenticate(
    verifier: &TokenVerifier,
    users: &dyn UserRepository,
    token: &str,
) -> Result<AuthContext, AuthError> {
    let claims = verifier.verify(token)?;
    let user_id = UserId(claims.id);

    let row = users
        .find_subscription(user_id)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::UnknownAccount)?;

    let mut ctx = AuthContext::new(user_id, row.profile().effective_plan())
        .with_role(Role::from_claim(claims.role.as_deref()));
    if let Some(email) = claims.email {
        ctx = ctx.with_email(email);
    }

    tracing::debug!(user_id = %ctx.user_id, plan = %ctx.plan, "request authenticated");
    Ok(ctx)
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        // Take the service that was polled ready, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let verifier = self.verifier.clone();
        let users = Arc::clone(&self.users);

        Box::pin(async move {
            if let Some(token) = extract_token(req.headers()) {
                match authenticate(&verifier, users.as_ref(), &token).await {
                    Ok(ctx) => {
                        req.extensions_mut().insert(AuthContextExt(ctx));
                    }
                    Err(e) => return Ok(e.into_response()),
                }
            }
            inner.call(req).await
        })
    }
}
