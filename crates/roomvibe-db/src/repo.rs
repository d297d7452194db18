//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;

use roomvibe_types::{UsageMonth, UserId};

use crate::error::DbResult;
use crate::models::*;

/// Read access to user accounts.
///
/// Accounts are owned by the auth service; this layer only reads them.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Subscription columns for a user
    async fn find_subscription(&self, id: UserId) -> DbResult<Option<UserSubscriptionRow>>;
}

/// Append-only log of metered PDF exports
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Number of exports recorded for a user in a month
    async fn count_for_month(&self, user_id: UserId, month: &UsageMonth) -> DbResult<u64>;

    /// Append one export record
    async fn record(&self, user_id: UserId, month: &UsageMonth) -> DbResult<PdfExportRow>;
}
