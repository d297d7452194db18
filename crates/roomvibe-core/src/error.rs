//! Core errors

use thiserror::Error;

use roomvibe_types::Environment;

/// Errors from the metered PDF export gate
#[derive(Error, Debug)]
pub enum UsageError {
    /// The plan does not include PDF export at all
    #[error("PDF export is not available on this plan")]
    NotEntitled,

    /// The monthly quota is used up
    #[error("monthly PDF export limit reached: {current} / {limit}")]
    QuotaExceeded {
        /// Exports already recorded this month
        current: u64,
        /// Monthly quota
        limit: u32,
    },

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] roomvibe_db::DbError),
}

impl UsageError {
    /// Whether this is a persistence failure rather than a policy decision
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Refusals from the database environment guard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// No usable connection string for the environment
    #[error("no database URL configured for {0} (expected {1})")]
    MissingUrl(Environment, &'static str),

    /// The selected URL is the other environment's URL
    #[error("{environment} environment is using the {other} database URL")]
    CrossEnvironmentUrl {
        environment: Environment,
        other: Environment,
    },

    /// The selected host looks like it belongs to the other environment
    #[error("{environment} environment detected a {other} database host: {host}")]
    CrossEnvironmentHost {
        environment: Environment,
        other: Environment,
        /// Masked host, safe to log
        host: String,
    },

    /// A required opt-in flag is not set
    #[error("{0} must be \"true\"")]
    NotAllowed(&'static str),

    /// Source and target of a clone are the same database
    #[error("production and staging URLs are the same")]
    SameDatabase,
}
