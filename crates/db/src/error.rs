//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    /// A unique constraint rejected the write (e.g. an email already in use).
    #[error("unique constraint violated")]
    Conflict,

    /// A pool cannot be created with zero connections.
    #[error("max_connections must be at least 1")]
    EmptyPool,

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// Classify a raw sqlx error, turning unique-key violations into
    /// [`DbError::Conflict`].
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => Self::Conflict,
            _ => Self::Sqlx(err),
        }
    }
}
