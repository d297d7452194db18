//! Application state for the RoomVibe API service.

use std::sync::Arc;

use roomvibe_axum::{FlagSource, TokenVerifier};
use roomvibe_core::{EnvironmentConfig, PdfExportGate, PlanRegistry};
use roomvibe_db::{DbPool, UsageRepository, UserRepository};

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Metered PDF export gate
    pub exports: PdfExportGate<dyn UsageRepository>,
    /// Account lookups for authentication
    pub users: Arc<dyn UserRepository>,
    /// Purchasable plans
    pub registry: Arc<PlanRegistry>,
    /// Feature flags, re-read per request
    pub flags: FlagSource,
    /// Session token verification
    pub verifier: TokenVerifier,
    /// Database pool (readiness checks)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: Config,
        pool: DbPool,
        usage: Arc<dyn UsageRepository>,
        users: Arc<dyn UserRepository>,
        registry: PlanRegistry,
        flags: FlagSource,
    ) -> Self {
        Self {
            exports: PdfExportGate::new(usage),
            users,
            registry: Arc::new(registry),
            flags,
            verifier: TokenVerifier::new(config.jwt_secret.as_bytes()),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }

    /// Environment classification inputs
    pub fn environment(&self) -> &EnvironmentConfig {
        &self.config.environment
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
