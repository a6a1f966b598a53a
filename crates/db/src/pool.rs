//! SQLite connection pool, schema bootstrap and liveness check.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::DbError;

/// Type alias for the shared pool used across the whole application.
pub type DbPool = SqlitePool;

/// Create a new connection pool from the given `database_url`.
///
/// `max_connections` controls the pool ceiling and must be non-zero. The
/// database file is created if it does not exist yet.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    if max_connections == 0 {
        return Err(DbError::EmptyPool);
    }
    info!("Connecting to database (max_connections={})", max_connections);
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create a pool over a private in-memory database.
///
/// Every SQLite `:memory:` connection opens its own database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn create_memory_pool() -> Result<DbPool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Run embedded SQLx migrations located in `./migrations` (relative to the
/// workspace root at build time). Safe to call on an already bootstrapped
/// database.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database bootstrapped successfully");
    Ok(())
}

/// Probe the database with `SELECT 1`.
///
/// Never fails: any error is logged and reported as `false`.
pub async fn check_connection(pool: &DbPool) -> bool {
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await {
        Ok(1) => {
            info!("Database connection successful");
            true
        }
        Ok(other) => {
            error!("Database connection failed: unexpected probe result {other}");
            false
        }
        Err(e) => {
            error!("Error testing database connection: {e}");
            false
        }
    }
}
