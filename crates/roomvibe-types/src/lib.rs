//! RoomVibe Types - Shared domain types
//!
//! This crate contains the closed domain vocabulary used across RoomVibe services:
//! - Subscription plans and their tier order
//! - Gated features
//! - Per-plan limits and monthly quotas
//! - Users, usage months and deployment environments

pub mod environment;
pub mod error;
pub mod feature;
pub mod limits;
pub mod plan;
pub mod usage;
pub mod user;

pub use environment::*;
pub use error::*;
pub use feature::*;
pub use limits::*;
pub use plan::*;
pub use usage::*;
pub use user::*;
