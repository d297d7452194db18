//! Environment classification
//!
//! Host inspection always outranks configuration: a single configuration set
//! can sit behind several hosts, and a production host must never be
//! downgraded by a leftover staging flag.

use roomvibe_types::Environment;

use crate::flags::parse_bool;

/// Substring identifying production request hosts
pub const DEFAULT_PRODUCTION_HOST: &str = "app.roomvibe.app";
/// Substring identifying staging request hosts
pub const DEFAULT_STAGING_HOST: &str = "staging.roomvibe.app";

/// Inputs to environment classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub production_host_marker: String,
    pub staging_host_marker: String,
    /// `STAGING_ENVIRONMENT`
    pub staging_flag: bool,
    /// `APP_ENV`
    pub app_env: Option<String>,
    /// `RUNTIME_MODE`, falling back to `NODE_ENV`
    pub runtime_mode: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            production_host_marker: DEFAULT_PRODUCTION_HOST.to_string(),
            staging_host_marker: DEFAULT_STAGING_HOST.to_string(),
            staging_flag: false,
            app_env: None,
            runtime_mode: None,
        }
    }
}

impl EnvironmentConfig {
    /// Read the configuration through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            production_host_marker: lookup("PRODUCTION_HOST")
                .unwrap_or_else(|| DEFAULT_PRODUCTION_HOST.to_string())
                .to_lowercase(),
            staging_host_marker: lookup("STAGING_HOST")
                .unwrap_or_else(|| DEFAULT_STAGING_HOST.to_string())
                .to_lowercase(),
            staging_flag: parse_bool(lookup("STAGING_ENVIRONMENT").as_deref(), false),
            app_env: lookup("APP_ENV"),
            runtime_mode: lookup("RUNTIME_MODE").or_else(|| lookup("NODE_ENV")),
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(crate::config::process_env)
    }

    /// Classify a request by its host, falling back to configuration.
    ///
    /// First match wins:
    /// 1. host contains the production marker
    /// 2. host contains the staging marker
    /// 3. staging flag set
    /// 4. `APP_ENV=production`
    /// 5. `APP_ENV=staging`
    /// 6. runtime mode `production`, else development
    pub fn resolve(&self, host: &str) -> Environment {
        let host = host.to_lowercase();

        if contains_marker(&host, &self.production_host_marker) {
            return Environment::Production;
        }
        if contains_marker(&host, &self.staging_host_marker) {
            return Environment::Staging;
        }
        self.resolve_without_host()
    }

    /// Classify the process when there is no request to inspect
    pub fn resolve_without_host(&self) -> Environment {
        if self.staging_flag {
            return Environment::Staging;
        }
        match normalized(self.app_env.as_deref()).as_deref() {
            Some("production") => return Environment::Production,
            Some("staging") => return Environment::Staging,
            _ => {}
        }
        if normalized(self.runtime_mode.as_deref()).as_deref() == Some("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    /// Whether the runtime mode alone says production
    pub fn is_production_runtime(&self) -> bool {
        normalized(self.runtime_mode.as_deref()).as_deref() == Some("production")
    }
}

fn contains_marker(host: &str, marker: &str) -> bool {
    !marker.is_empty() && host.contains(marker)
}

fn normalized(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_ascii_lowercase())
}
