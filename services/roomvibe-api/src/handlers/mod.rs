//! REST API handlers

pub mod billing;
pub mod entitlements;
pub mod exports;
pub mod flags;
pub mod health;
pub mod shared;

pub use billing::*;
pub use entitlements::*;
pub use exports::*;
pub use flags::*;
pub use health::*;
