//! Parse errors for the closed domain enumerations

use thiserror::Error;

/// Error turning a loosely-typed value into a domain type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Plan identifier outside the known set
    #[error("unknown plan: {0}")]
    Plan(String),

    /// Feature identifier outside the known set
    #[error("unknown feature: {0}")]
    Feature(String),

    /// Quota that is neither -1 nor a non-negative count
    #[error("invalid quota: {0} (expected -1 or a non-negative count)")]
    Quota(i64),

    /// Month not in `YYYY-MM` form
    #[error("invalid usage month: {0}")]
    Month(String),

    /// Environment name outside the known set
    #[error("unknown environment: {0}")]
    Environment(String),
}
