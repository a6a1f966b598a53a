//! Request and response shapes of the account use-cases.

use chrono::{DateTime, Utc};
use db::models::UserRow;
use serde::{Deserialize, Serialize};

/// Body of a sign-up request.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Body of a profile update. Absent fields are left unchanged.
///
/// The email address is the login identity and cannot be changed, so any
/// field outside this set is rejected during deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.password.is_none()
    }
}

/// The externally visible view of an account. Carries no password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub account_created: DateTime<Utc>,
    pub account_updated: DateTime<Utc>,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            account_created: row.account_created,
            account_updated: row.account_updated,
        }
    }
}
