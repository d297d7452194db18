//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use roomvibe_types::{SubscriptionProfile, UserId};

/// One recorded PDF export
#[derive(Debug, Clone, FromRow)]
pub struct PdfExportRow {
    pub id: i32,
    pub user_id: i32,
    pub export_month: String,
    pub created_at: DateTime<Utc>,
}

/// Subscription columns of a `users` row
#[derive(Debug, Clone, FromRow)]
pub struct UserSubscriptionRow {
    pub id: i32,
    pub is_admin: Option<bool>,
    pub subscription_status: Option<String>,
    pub subscription_plan: Option<String>,
    pub artist_access: Option<bool>,
    pub designer_access: Option<bool>,
    pub gallery_access: Option<bool>,
}

impl PdfExportRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.user_id)
    }
}

impl UserSubscriptionRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Convert to the domain profile used for plan resolution
    pub fn profile(&self) -> SubscriptionProfile {
        SubscriptionProfile {
            is_admin: self.is_admin.unwrap_or(false),
            status: self.subscription_status.clone(),
            plan: self.subscription_plan.clone(),
            artist_access: self.artist_access.unwrap_or(false),
            designer_access: self.designer_access.unwrap_or(false),
            gallery_access: self.gallery_access.unwrap_or(false),
        }
    }
}
