//! Mock repositories for testing

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use roomvibe_db::{DbError, DbResult, PdfExportRow, UsageRepository};
use roomvibe_types::{UsageMonth, UserId};

/// In-memory usage log for testing
#[derive(Default, Clone)]
pub struct MockUsageRepository {
    rows: Arc<DashMap<(UserId, UsageMonth), Vec<PdfExportRow>>>,
    next_id: Arc<AtomicI32>,
    counts: Arc<AtomicUsize>,
}

impl MockUsageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `n` exports for a user in a month
    pub fn seed(&self, user_id: UserId, month: &UsageMonth, n: usize) {
        for _ in 0..n {
            self.push(user_id, month);
        }
    }

    /// Rows stored for a user in a month
    pub fn stored(&self, user_id: UserId, month: &UsageMonth) -> usize {
        self.rows
            .get(&(user_id, month.clone()))
            .map_or(0, |rows| rows.len())
    }

    /// Number of count queries issued
    #[allow(dead_code)]
    pub fn count_queries(&self) -> usize {
        self.counts.load(Ordering::SeqCst)
    }

    fn push(&self, user_id: UserId, month: &UsageMonth) -> PdfExportRow {
        let row = PdfExportRow {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: user_id.0,
            export_month: month.to_string(),
            created_at: Utc::now(),
        };
        self.rows
            .entry((user_id, month.clone()))
            .or_default()
            .push(row.clone());
        row
    }
}

#[async_trait]
impl UsageRepository for MockUsageRepository {
    async fn count_for_month(&self, user_id: UserId, month: &UsageMonth) -> DbResult<u64> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored(user_id, month) as u64)
    }

    async fn record(&self, user_id: UserId, month: &UsageMonth) -> DbResult<PdfExportRow> {
        Ok(self.push(user_id, month))
    }
}

/// Usage repository whose every call fails
#[derive(Default, Clone)]
#[allow(dead_code)]
pub struct FailingUsageRepository;

#[async_trait]
impl UsageRepository for FailingUsageRepository {
    async fn count_for_month(&self, _: UserId, _: &UsageMonth) -> DbResult<u64> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn record(&self, _: UserId, _: &UsageMonth) -> DbResult<PdfExportRow> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}
