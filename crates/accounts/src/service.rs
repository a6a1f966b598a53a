//! Account use-cases: sign-up, credential check and profile update.
//!
//! Each function validates its input, does the password work on tokio's
//! blocking pool (Argon2 is deliberately slow) and delegates storage to the
//! `db` repository functions.

use db::models::{NewUser, UserChanges, UserRow};
use db::repository::users as user_repo;
use db::{DbError, DbPool};
use tracing::{info, instrument, warn};

use crate::models::{PublicUser, SignupRequest, UpdateUserRequest};
use crate::password::{dummy_hash, hash_password, verify_password};
use crate::validation::{normalize_email, validate_signup, validate_update};
use crate::AccountError;

async fn hash_blocking(plain: String) -> Result<String, AccountError> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?
}

async fn verify_blocking(plain: String, phc: String) -> Result<bool, AccountError> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &phc))
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))
}

/// Register a new account.
///
/// # Errors
/// - [`AccountError::Validation`] for a malformed request.
/// - [`AccountError::EmailTaken`] if the email is already registered.
#[instrument(skip_all)]
pub async fn signup(pool: &DbPool, req: SignupRequest) -> Result<PublicUser, AccountError> {
    let req = validate_signup(req)?;
    let password = hash_blocking(req.password).await?;

    let new_user = NewUser {
        email: req.email,
        password,
        first_name: req.first_name,
        last_name: req.last_name,
    };

    match user_repo::create_user(pool, &new_user).await {
        Ok(row) => {
            info!(user_id = row.id, "Account registered");
            Ok(row.into())
        }
        Err(DbError::Conflict) => {
            warn!("Sign-up rejected: email already registered");
            Err(AccountError::EmailTaken)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve Basic-auth style credentials to a stored user.
///
/// Unknown emails and wrong passwords both yield
/// [`AccountError::InvalidCredentials`].
#[instrument(skip_all)]
pub async fn authenticate(
    pool: &DbPool,
    email: &str,
    password: &str,
) -> Result<UserRow, AccountError> {
    let user = match normalize_email(email) {
        Ok(email) => user_repo::get_user_by_email(pool, &email).await?,
        Err(_) => None,
    };

    let Some(user) = user else {
        // Unknown accounts still cost one Argon2 verification.
        verify_blocking(password.to_owned(), dummy_hash().to_owned()).await?;
        info!("Authentication failed: unknown account");
        return Err(AccountError::InvalidCredentials);
    };

    if verify_blocking(password.to_owned(), user.password.clone()).await? {
        Ok(user)
    } else {
        info!(user_id = user.id, "Authentication failed: wrong password");
        Err(AccountError::InvalidCredentials)
    }
}

/// Apply a profile update to the account with id `user_id`.
///
/// # Errors
/// - [`AccountError::Validation`] for a malformed or empty request.
/// - [`AccountError::NotFound`] if the account disappeared.
#[instrument(skip(pool, req))]
pub async fn update_profile(
    pool: &DbPool,
    user_id: i64,
    req: UpdateUserRequest,
) -> Result<PublicUser, AccountError> {
    let req = validate_update(req)?;
    let password = match req.password {
        Some(plain) => Some(hash_blocking(plain).await?),
        None => None,
    };

    let changes = UserChanges {
        first_name: req.first_name,
        last_name: req.last_name,
        password,
    };

    match user_repo::update_user(pool, user_id, &changes).await {
        Ok(row) => Ok(row.into()),
        Err(DbError::NotFound) => Err(AccountError::NotFound(user_id)),
        Err(e) => Err(e.into()),
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use db::pool::{create_memory_pool, run_migrations};

    async fn test_pool() -> DbPool {
        let pool = create_memory_pool().await.expect("pool");
        run_migrations(&pool).await.expect("migrations");
        pool
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            email: "email@email.com".into(),
            first_name: "test_first_name".into(),
            last_name: "test_last_name".into(),
            password: "supersecretpassword".into(),
        }
    }

    #[tokio::test]
    async fn signup_stores_hash_not_plain_text() {
        let pool = test_pool().await;
        let user = signup(&pool, signup_request()).await.expect("signup");

        let row = user_repo::get_user(&pool, user.id).await.expect("row");
        assert_ne!(row.password, "supersecretpassword");
        assert!(verify_password("supersecretpassword", &row.password));
    }

    #[tokio::test]
    async fn duplicate_signup_is_email_taken() {
        let pool = test_pool().await;
        signup(&pool, signup_request()).await.expect("first signup");

        let mut again = signup_request();
        again.email = "EMAIL@email.com".into();
        let err = signup(&pool, again).await.unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken), "got {err:?}");
    }

    #[tokio::test]
    async fn authenticate_accepts_right_password_only() {
        let pool = test_pool().await;
        let created = signup(&pool, signup_request()).await.expect("signup");

        let user = authenticate(&pool, "email@email.com", "supersecretpassword")
            .await
            .expect("valid credentials");
        assert_eq!(user.id, created.id);

        let wrong = authenticate(&pool, "email@email.com", "wrongpassword").await;
        assert!(matches!(wrong, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn authenticate_unknown_user_is_invalid_credentials() {
        let pool = test_pool().await;
        for email in ["hacker", "nobody@email.com"] {
            let result = authenticate(&pool, email, "hackerpassword").await;
            assert!(matches!(result, Err(AccountError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn update_profile_rehashes_password() {
        let pool = test_pool().await;
        let created = signup(&pool, signup_request()).await.expect("signup");

        let updated = update_profile(
            &pool,
            created.id,
            UpdateUserRequest {
                first_name: Some("updated_first_name".into()),
                last_name: Some("updated_last_name".into()),
                password: Some("updatedpassword".into()),
            },
        )
        .await
        .expect("update");
        assert_eq!(updated.first_name, "updated_first_name");
        assert_eq!(updated.email, created.email);

        assert!(authenticate(&pool, "email@email.com", "updatedpassword").await.is_ok());
        assert!(authenticate(&pool, "email@email.com", "supersecretpassword").await.is_err());
    }

    #[tokio::test]
    async fn update_profile_of_missing_user_is_not_found() {
        let pool = test_pool().await;
        let req = UpdateUserRequest {
            last_name: Some("Ghost".into()),
            ..UpdateUserRequest::default()
        };
        let err = update_profile(&pool, 99, req).await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(99)));
    }
}
