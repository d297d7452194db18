//! Request host extraction and environment classification

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};

use roomvibe_core::EnvironmentConfig;
use roomvibe_types::Environment;

const FORWARDED_HOST: &str = "x-forwarded-host";

/// Host the client addressed: `X-Forwarded-Host`, else `Host`, lowercased.
/// Empty when neither header is readable.
pub fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_HOST)
        .or_else(|| headers.get(header::HOST))
        .and_then(|value| value.to_str().ok())
        .map(|host| host.trim().to_lowercase())
        .unwrap_or_default()
}

/// Environment of the current request
pub fn request_environment(config: &EnvironmentConfig, headers: &HeaderMap) -> Environment {
    config.resolve(&request_host(headers))
}

/// Extractor for the request host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost(pub String);

impl<S> FromRequestParts<S> for RequestHost
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(request_host(&parts.headers)))
    }
}
