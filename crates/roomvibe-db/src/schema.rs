//! Schema bootstrap for tables this service owns

use crate::DbPool;

const CREATE_PDF_EXPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS pdf_exports (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    export_month VARCHAR(7) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_PDF_EXPORTS_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_pdf_exports_user_month
    ON pdf_exports (user_id, export_month)
"#;

/// Create the `pdf_exports` table and its lookup index if missing.
///
/// `users` is owned by the auth service and must already exist.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_PDF_EXPORTS, CREATE_PDF_EXPORTS_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("pdf_exports schema ready");
    Ok(())
}
