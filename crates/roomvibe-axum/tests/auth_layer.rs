//! End-to-end behaviour of the auth layer and feature gates on a router

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use dashmap::DashMap;
use roomvibe_axum::token::sign;
use roomvibe_axum::{
    enforce_gate, AuthLayer, FeatureGate, FlagSource, MaybeAuth, RequireAuth, SessionClaims,
    TokenVerifier,
};
use roomvibe_core::FeatureFlags;
use roomvibe_db::{DbResult, UserRepository, UserSubscriptionRow};
use roomvibe_types::UserId;
use serde_json::Value;
use tower::ServiceExt;

const SECRET: &[u8] = b"layer-test-secret";

#[derive(Default, Clone)]
struct MockUserRepository {
    rows: Arc<DashMap<UserId, UserSubscriptionRow>>,
}

impl MockUserRepository {
    fn with_user(id: i32, plan: &str) -> Self {
        let repo = Self::default();
        repo.rows.insert(
            UserId(id),
            UserSubscriptionRow {
                id,
                is_admin: Some(false),
                subscription_status: Some("active".into()),
                subscription_plan: Some(plan.into()),
                artist_access: None,
                designer_access: None,
                gallery_access: None,
            },
        );
        repo
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_subscription(&self, id: UserId) -> DbResult<Option<UserSubscriptionRow>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }
}

async fn whoami(auth: RequireAuth) -> String {
    format!("{}:{}", auth.user_id, auth.plan)
}

async fn greeting(auth: MaybeAuth) -> String {
    match auth.0 {
        Some(ctx) => format!("hello {}", ctx.user_id),
        None => "hello guest".to_string(),
    }
}

fn app(users: MockUserRepository) -> Router {
    Router::new()
        .route("/me", get(whoami))
        .route("/hello", get(greeting))
        .layer(AuthLayer::new(TokenVerifier::new(SECRET), Arc::new(users)))
}

fn cookie_for(id: i32) -> String {
    let claims = SessionClaims {
        id,
        email: None,
        role: None,
        exp: None,
    };
    format!("token={}", sign(&claims, SECRET).unwrap())
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_valid_cookie_resolves_effective_plan() {
    let response = app(MockUserRepository::with_user(5, "designer"))
        .oneshot(
            Request::get("/me")
                .header(header::COOKIE, cookie_for(5))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "5:designer");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let response = app(MockUserRepository::default())
        .oneshot(Request::get("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_invalid_token_is_403() {
    let response = app(MockUserRepository::with_user(5, "designer"))
        .oneshot(
            Request::get("/hello")
                .header(header::COOKIE, "token=not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_optional_auth_without_token() {
    let response = app(MockUserRepository::default())
        .oneshot(Request::get("/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "hello guest");
}

#[tokio::test]
async fn test_unknown_account_is_401() {
    let response = app(MockUserRepository::default())
        .oneshot(
            Request::get("/me")
                .header(header::COOKIE, cookie_for(99))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_closed_payments_gate() {
    let flags = FeatureFlags {
        gallery_enabled: true,
        exhibition_public_enabled: true,
        stripe_enabled: true,
        payments_enabled: false,
    };
    let app = Router::new().route("/plans", get(|| async { "plans" })).layer(
        from_fn_with_state((FeatureGate::Payments, FlagSource::fixed(flags)), enforce_gate),
    );

    let response = app
        .oneshot(Request::get("/plans").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["code"], "PAYMENTS_DISABLED");
    assert_eq!(json["feature"], "payments");
}

#[tokio::test]
async fn test_open_gallery_gate_passes_through() {
    let app = Router::new().route("/gallery", get(|| async { "gallery" })).layer(
        from_fn_with_state(
            (FeatureGate::Gallery, FlagSource::fixed(FeatureFlags::from_lookup(|_| None))),
            enforce_gate,
        ),
    );

    let response = app
        .oneshot(Request::get("/gallery").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
