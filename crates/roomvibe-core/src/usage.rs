//! Metered PDF export gate
//!
//! Usage is counted per user per calendar month (UTC). The quota is a soft
//! limit: the count and the insert are not serialized, so two concurrent
//! exports at `limit - 1` can both succeed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use roomvibe_db::repo::UsageRepository;
use roomvibe_types::{PlanLimits, Quota, UsageMonth, UserId};

use crate::error::UsageError;

/// Read-only view of a user's PDF export allowance for the month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub can_export: bool,
    pub pdf_enabled: bool,
    pub current_count: u64,
    pub monthly_limit: Quota,
    pub remaining: Quota,
    pub current_month: UsageMonth,
}

/// Outcome of a recorded export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    /// Count after the insert
    pub current_count: u64,
    pub monthly_limit: Quota,
    pub remaining: Quota,
    pub current_month: UsageMonth,
}

/// Checks and records PDF exports against a plan's monthly quota
pub struct PdfExportGate<R: UsageRepository + ?Sized> {
    usage: Arc<R>,
}

impl<R: UsageRepository + ?Sized> Clone for PdfExportGate<R> {
    fn clone(&self) -> Self {
        Self {
            usage: Arc::clone(&self.usage),
        }
    }
}

impl<R: UsageRepository + ?Sized> std::fmt::Debug for PdfExportGate<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfExportGate").finish_non_exhaustive()
    }
}

impl<R: UsageRepository + ?Sized> PdfExportGate<R> {
    pub fn new(usage: Arc<R>) -> Self {
        Self { usage }
    }

    /// Status for the current month
    pub async fn status(
        &self,
        user_id: UserId,
        limits: &PlanLimits,
    ) -> Result<ExportStatus, UsageError> {
        self.status_at(user_id, limits, Utc::now()).await
    }

    /// Status for the month containing `now`
    #[instrument(skip(self, limits), fields(user_id = %user_id))]
    pub async fn status_at(
        &self,
        user_id: UserId,
        limits: &PlanLimits,
        now: DateTime<Utc>,
    ) -> Result<ExportStatus, UsageError> {
        let month = UsageMonth::containing(now);
        let current_count = self.usage.count_for_month(user_id, &month).await?;
        let quota = limits.pdf_monthly_limit;

        Ok(ExportStatus {
            can_export: limits.pdf_export && quota.allows(current_count),
            pdf_enabled: limits.pdf_export,
            current_count,
            monthly_limit: quota,
            remaining: quota.remaining(current_count),
            current_month: month,
        })
    }

    /// Record one export for the current month
    pub async fn commit(
        &self,
        user_id: UserId,
        limits: &PlanLimits,
    ) -> Result<ExportReceipt, UsageError> {
        self.commit_at(user_id, limits, Utc::now()).await
    }

    /// Record one export in the month containing `now`.
    ///
    /// Nothing is written when the plan lacks PDF export or the quota is
    /// used up.
    #[instrument(skip(self, limits), fields(user_id = %user_id))]
    pub async fn commit_at(
        &self,
        user_id: UserId,
        limits: &PlanLimits,
        now: DateTime<Utc>,
    ) -> Result<ExportReceipt, UsageError> {
        if !limits.pdf_export {
            debug!("plan has no PDF export");
            return Err(UsageError::NotEntitled);
        }

        let month = UsageMonth::containing(now);
        let quota = limits.pdf_monthly_limit;

        if let Quota::Limited(limit) = quota {
            let current = self.usage.count_for_month(user_id, &month).await?;
            if !quota.allows(current) {
                debug!(current, limit, "monthly PDF quota exhausted");
                return Err(UsageError::QuotaExceeded { current, limit });
            }
        }

        self.usage.record(user_id, &month).await?;
        let current_count = self.usage.count_for_month(user_id, &month).await?;

        info!(month = %month, current_count, "PDF export recorded");

        Ok(ExportReceipt {
            current_count,
            monthly_limit: quota,
            remaining: quota.remaining(current_count),
            current_month: month,
        })
    }
}
