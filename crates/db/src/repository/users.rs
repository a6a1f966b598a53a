//! User account CRUD operations.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::{
    DbError,
    models::{NewUser, UserChanges, UserRow},
};

const USER_COLUMNS: &str =
    "id, email, password, first_name, last_name, account_created, account_updated";

/// Insert a new user.
///
/// Returns [`DbError::Conflict`] if the email is already registered.
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<UserRow, DbError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (email, password, first_name, last_name, account_created, account_updated)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(DbError::from_write)?;

    info!(user_id = row.id, "User created");
    Ok(row)
}

/// Look a user up by email. `None` if no account uses it.
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Fetch a single user by its primary key.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Apply `changes` to the user with the given id and refresh
/// `account_updated`.
///
/// Only names and the password hash are writable; email and
/// `account_created` are left untouched. Returns `DbError::NotFound` if no
/// row matched.
pub async fn update_user(
    pool: &SqlitePool,
    id: i64,
    changes: &UserChanges,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users
        SET first_name      = COALESCE(?1, first_name),
            last_name       = COALESCE(?2, last_name),
            password        = COALESCE(?3, password),
            account_updated = ?4
        WHERE id = ?5
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(changes.first_name.as_deref())
    .bind(changes.last_name.as_deref())
    .bind(changes.password.as_deref())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    info!(user_id = row.id, "User updated");
    Ok(row)
}
