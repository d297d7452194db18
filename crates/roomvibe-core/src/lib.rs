//! RoomVibe Core - Plan and usage business logic
//!
//! Everything that decides whether a request for a gated action may proceed:
//! - the plan registry and its Stripe price references
//! - the entitlement (upgrade) matrix and upgrade prompts
//! - the monthly PDF export quota
//! - process-wide feature flags
//! - environment classification and the database environment guard
//!
//! # Example
//!
//! ```rust,ignore
//! use roomvibe_core::{entitlement, FeatureFlags, PdfExportGate};
//! use roomvibe_types::{Feature, Plan, PlanLimits};
//!
//! // Which plan unlocks PDF export for an artist?
//! assert_eq!(entitlement::recommended_upgrade(Plan::Artist, Feature::PdfExport), Some(Plan::Designer));
//!
//! // Check and record a PDF export
//! let gate = PdfExportGate::new(repos.usage.clone().into());
//! let status = gate.status(user_id, PlanLimits::for_plan(plan)).await?;
//! if status.can_export {
//!     gate.commit(user_id, PlanLimits::for_plan(plan)).await?;
//! }
//! ```

pub mod config;
pub mod db_guard;
pub mod entitlement;
pub mod environment;
pub mod error;
pub mod flags;
pub mod registry;
pub mod usage;

pub use db_guard::{CloneGuardConfig, ClonePlan, DatabaseGuardConfig, DatabaseTarget};
pub use entitlement::EntitlementCheck;
pub use environment::EnvironmentConfig;
pub use error::{GuardError, UsageError};
pub use flags::{parse_bool, FeatureFlags};
pub use registry::{PlanEntry, PlanRegistry};
pub use usage::{ExportReceipt, ExportStatus, PdfExportGate};
