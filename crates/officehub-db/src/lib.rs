//! # OfficeHub DB
//!
//! Database pool, migrations and the identity store for the OfficeHub API.
//!
//! The request gate resolves identities through the [`IdentityStore`] trait so
//! it can run against Postgres in production and against
//! [`MemoryIdentityStore`] (feature `test-utils`) in tests.
//!
//! # Example
//!
//! ```ignore
//! use officehub_db::{MIGRATOR, PgIdentityStore, init_db_pool};
//!
//! let pool = init_db_pool(&config.database).await?;
//! MIGRATOR.run(&pool).await?;
//! let identities = PgIdentityStore::new(pool.clone());
//! ```

pub mod errors;
pub mod identity;
#[cfg(feature = "test-utils")]
pub mod memory;

use std::time::Duration;

use officehub_config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub use errors::{map_db_error, unique_violation_or};
pub use identity::{IdentityStore, PgIdentityStore};
#[cfg(feature = "test-utils")]
pub use memory::MemoryIdentityStore;
pub use sqlx::PgPool;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens a PostgreSQL connection pool.
///
/// Called once during startup; the pool is cheaply cloneable and shared
/// through the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );
    Ok(pool)
}
