//! PostgreSQL usage repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use roomvibe_types::{UsageMonth, UserId};

use crate::error::DbResult;
use crate::models::PdfExportRow;
use crate::repo::UsageRepository;

/// PostgreSQL usage repository backed by the `pdf_exports` table
#[derive(Clone)]
pub struct PgUsageRepository {
    pool: PgPool,
}

impl PgUsageRepository {
    /// Create a new usage repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageRepository for PgUsageRepository {
    async fn count_for_month(&self, user_id: UserId, month: &UsageMonth) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM pdf_exports
            WHERE user_id = $1 AND export_month = $2
            "#,
        )
        .bind(user_id.0)
        .bind(month.as_str())
        .fetch_one(&self.pool)
        .await?;

        // COUNT(*) is never negative
        Ok(count.max(0) as u64)
    }

    async fn record(&self, user_id: UserId, month: &UsageMonth) -> DbResult<PdfExportRow> {
        let row = sqlx::query_as::<_, PdfExportRow>(
            r#"
            INSERT INTO pdf_exports (user_id, export_month)
            VALUES ($1, $2)
            RETURNING id, user_id, export_month, created_at
            "#,
        )
        .bind(user_id.0)
        .bind(month.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = %user_id, month = %month, export_id = row.id, "PDF export recorded");

        Ok(row)
    }
}
