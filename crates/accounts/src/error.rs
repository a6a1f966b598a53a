//! Account-level error types.

use thiserror::Error;

/// Errors produced by the account use-cases (validation + persistence).
#[derive(Debug, Error)]
pub enum AccountError {
    // ------ Request errors ------

    /// A field of the request failed validation.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Another account already uses the email address.
    #[error("email address is already registered")]
    EmailTaken,

    /// Unknown email or wrong password. Deliberately not more specific.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account referenced by id no longer exists.
    #[error("user {0} not found")]
    NotFound(i64),

    // ------ Internal errors ------

    /// Password hashing failed or its worker task was lost.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}
