//! PostgreSQL repository implementations

mod usage;
mod user;

pub use usage::PgUsageRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub usage: PgUsageRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            usage: PgUsageRepository::new(pool),
        }
    }
}
