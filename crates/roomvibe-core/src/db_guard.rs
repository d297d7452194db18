//! Database environment guard
//!
//! Picks the connection string for the deployment and refuses any choice that
//! would point staging at production data or the other way round. Also gates
//! the destructive production-to-staging clone.

use tracing::{info, warn};
use url::Url;

use roomvibe_types::Environment;

use crate::error::GuardError;
use crate::flags::parse_bool;

const STAGING_URL_KEY: &str = "DATABASE_URL_STAGING";
const PRODUCTION_URL_KEY: &str = "DATABASE_URL_PRODUCTION";
const LEGACY_URL_KEY: &str = "DATABASE_URL";

/// Substrings that mark a production database host
pub const PRODUCTION_HOST_PATTERNS: &[&str] = &["neon.tech", "prod.neon", "production"];

/// Substrings that mark a staging or local database host
pub const STAGING_HOST_PATTERNS: &[&str] = &["replit", "staging", "dev.", "localhost", "neon.tech"];

/// Inputs to [`select_database`]
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseGuardConfig {
    /// `STAGING_ENVIRONMENT=true`
    pub staging: bool,
    /// Runtime mode is production; disables the bypass
    pub production_runtime: bool,
    /// `DB_GUARD_BYPASS=true`
    pub bypass: bool,
    pub staging_url: Option<String>,
    pub production_url: Option<String>,
    pub legacy_url: Option<String>,
}

impl std::fmt::Debug for DatabaseGuardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseGuardConfig")
            .field("staging", &self.staging)
            .field("production_runtime", &self.production_runtime)
            .field("bypass", &self.bypass)
            .field("staging_url", &self.staging_url.as_deref().map(mask_url))
            .field("production_url", &self.production_url.as_deref().map(mask_url))
            .field("legacy_url", &self.legacy_url.as_deref().map(mask_url))
            .finish()
    }
}

impl DatabaseGuardConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let runtime_mode = lookup("RUNTIME_MODE").or_else(|| lookup("NODE_ENV"));
        Self {
            staging: parse_bool(lookup("STAGING_ENVIRONMENT").as_deref(), false),
            production_runtime: runtime_mode
                .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("production")),
            bypass: parse_bool(lookup("DB_GUARD_BYPASS").as_deref(), false),
            staging_url: lookup(STAGING_URL_KEY),
            production_url: lookup(PRODUCTION_URL_KEY),
            legacy_url: lookup(LEGACY_URL_KEY),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(crate::config::process_env)
    }

    /// Deployment the guard protects. Only staging and production exist here.
    pub fn environment(&self) -> Environment {
        if self.staging {
            Environment::Staging
        } else {
            Environment::Production
        }
    }
}

/// The connection string the process is allowed to use
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseTarget {
    pub environment: Environment,
    pub url: String,
    /// Checks were skipped
    pub bypassed: bool,
}

impl DatabaseTarget {
    /// Loggable form of the URL
    pub fn masked(&self) -> String {
        mask_url(&self.url)
    }
}

impl std::fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseTarget")
            .field("environment", &self.environment)
            .field("url", &self.masked())
            .field("bypassed", &self.bypassed)
            .finish()
    }
}

/// Choose and validate the database URL for this deployment
pub fn select_database(config: &DatabaseGuardConfig) -> Result<DatabaseTarget, GuardError> {
    let environment = config.environment();

    if config.bypass && !config.production_runtime {
        let url = config
            .staging_url
            .as_ref()
            .or(config.production_url.as_ref())
            .or(config.legacy_url.as_ref())
            .ok_or(GuardError::MissingUrl(environment, LEGACY_URL_KEY))?;
        warn!(host = %mask_url(url), "database guard bypassed");
        return Ok(DatabaseTarget {
            environment,
            url: url.clone(),
            bypassed: true,
        });
    }

    let (url, other_url, other) = match environment {
        Environment::Staging => (
            config.staging_url.as_ref().or(config.legacy_url.as_ref()),
            config.production_url.as_ref(),
            Environment::Production,
        ),
        _ => (
            config.production_url.as_ref().or(config.legacy_url.as_ref()),
            config.staging_url.as_ref(),
            Environment::Staging,
        ),
    };

    let expected = match environment {
        Environment::Staging => STAGING_URL_KEY,
        _ => PRODUCTION_URL_KEY,
    };
    let url = url.ok_or(GuardError::MissingUrl(environment, expected))?;

    if other_url == Some(url) {
        return Err(GuardError::CrossEnvironmentUrl { environment, other });
    }

    let looks_foreign = match environment {
        Environment::Staging => is_production_host(url) && !is_staging_host(url),
        _ => is_staging_host(url) && !is_production_host(url),
    };
    if looks_foreign {
        return Err(GuardError::CrossEnvironmentHost {
            environment,
            other,
            host: mask_url(url),
        });
    }

    info!(%environment, host = %mask_url(url), "database selected");
    Ok(DatabaseTarget {
        environment,
        url: url.clone(),
        bypassed: false,
    })
}

/// Inputs to [`check_clone`]
#[derive(Clone, PartialEq, Eq)]
pub struct CloneGuardConfig {
    /// `STAGING_ENVIRONMENT=true`
    pub staging: bool,
    /// `ALLOW_PROD_TO_STAGING_CLONE=true`
    pub allow_clone: bool,
    pub production_url: Option<String>,
    /// `DATABASE_URL_STAGING`, falling back to `DATABASE_URL`
    pub staging_url: Option<String>,
}

impl std::fmt::Debug for CloneGuardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloneGuardConfig")
            .field("staging", &self.staging)
            .field("allow_clone", &self.allow_clone)
            .field("production_url", &self.production_url.as_deref().map(mask_url))
            .field("staging_url", &self.staging_url.as_deref().map(mask_url))
            .finish()
    }
}

impl CloneGuardConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            staging: parse_bool(lookup("STAGING_ENVIRONMENT").as_deref(), false),
            allow_clone: parse_bool(lookup("ALLOW_PROD_TO_STAGING_CLONE").as_deref(), false),
            production_url: lookup(PRODUCTION_URL_KEY),
            staging_url: lookup(STAGING_URL_KEY).or_else(|| lookup(LEGACY_URL_KEY)),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(crate::config::process_env)
    }
}

/// Source and target of an approved clone
#[derive(Clone, PartialEq, Eq)]
pub struct ClonePlan {
    pub source_url: String,
    pub target_url: String,
}

impl std::fmt::Debug for ClonePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClonePlan")
            .field("source_url", &mask_url(&self.source_url))
            .field("target_url", &mask_url(&self.target_url))
            .finish()
    }
}

/// Approve a production-to-staging clone, or say why not
pub fn check_clone(config: &CloneGuardConfig) -> Result<ClonePlan, GuardError> {
    if !config.staging {
        return Err(GuardError::NotAllowed("STAGING_ENVIRONMENT"));
    }
    if !config.allow_clone {
        return Err(GuardError::NotAllowed("ALLOW_PROD_TO_STAGING_CLONE"));
    }
    let source = config
        .production_url
        .as_ref()
        .ok_or(GuardError::MissingUrl(Environment::Production, PRODUCTION_URL_KEY))?;
    let target = config
        .staging_url
        .as_ref()
        .ok_or(GuardError::MissingUrl(Environment::Staging, STAGING_URL_KEY))?;
    if source == target {
        return Err(GuardError::SameDatabase);
    }

    info!(
        source = %mask_url(source),
        target = %mask_url(target),
        "production to staging clone approved"
    );
    Ok(ClonePlan {
        source_url: source.clone(),
        target_url: target.clone(),
    })
}

/// `host[:port]/dbname` with credentials, query and fragment stripped
pub fn mask_url(url: &str) -> String {
    const MASKED: &str = "***masked***";

    let Ok(parsed) = Url::parse(url) else {
        return MASKED.to_string();
    };
    let Some(host) = parsed.host_str().filter(|h| !h.is_empty()) else {
        return MASKED.to_string();
    };
    let db = parsed
        .path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|s| !s.is_empty())
        .unwrap_or("***");

    match parsed.port() {
        Some(port) => format!("{host}:{port}/{db}"),
        None => format!("{host}/{db}"),
    }
}

// Pattern checks look at the masked form so credentials never influence them.
fn is_production_host(url: &str) -> bool {
    let target = mask_url(url).to_lowercase();
    PRODUCTION_HOST_PATTERNS.iter().any(|p| target.contains(p))
}

fn is_staging_host(url: &str) -> bool {
    let target = mask_url(url).to_lowercase();
    STAGING_HOST_PATTERNS.iter().any(|p| target.contains(p))
}
