//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use roomvibe_types::UserId;

use crate::error::DbResult;
use crate::models::UserSubscriptionRow;
use crate::repo::UserRepository;

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_subscription(&self, id: UserId) -> DbResult<Option<UserSubscriptionRow>> {
        let row = sqlx::query_as::<_, UserSubscriptionRow>(
            r#"
            SELECT id, is_admin, subscription_status, subscription_plan,
                   artist_access, designer_access, gallery_access
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
