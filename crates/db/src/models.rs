//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! Domain types live in the `accounts` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted user account row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    /// PHC-formatted password hash. Never the plain-text password.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub account_created: DateTime<Utc>,
    pub account_updated: DateTime<Utc>,
}

/// Column values for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial update for an existing user; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}
