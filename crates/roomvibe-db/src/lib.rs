//! RoomVibe DB - Database abstractions
//!
//! SQLx-based database layer for RoomVibe services.
//!
//! # Example
//!
//! ```rust,ignore
//! use roomvibe_db::{create_pool, ensure_schema, Repositories};
//!
//! let pool = create_pool("postgres://localhost/roomvibe").await?;
//! ensure_schema(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let used = repos.usage.count_for_month(user_id, &month).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod schema;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
pub use schema::ensure_schema;
