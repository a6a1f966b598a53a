//! Request validation — run this before hashing or persisting anything.
//!
//! Rules enforced:
//! 1. Email: one `@`, non-empty local part, a dotted domain, no whitespace.
//!    Emails are compared and stored lower-cased.
//! 2. First and last name must be non-empty after trimming.
//! 3. Passwords must be at least [`MIN_PASSWORD_LEN`] characters.
//! 4. An update must change at least one field.

use crate::{AccountError, models::{SignupRequest, UpdateUserRequest}};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trim and lower-case an email, then check its shape.
///
/// # Errors
/// [`AccountError::Validation`] naming the `email` field.
pub fn normalize_email(raw: &str) -> Result<String, AccountError> {
    let invalid = |reason: &'static str| AccountError::Validation { field: "email", reason };

    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email.split_once('@').ok_or(invalid("must contain '@'"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must have exactly one '@' after a non-empty local part"));
    }
    if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
        return Err(invalid("must have a dotted domain"));
    }

    Ok(email)
}

fn normalize_name(field: &'static str, raw: &str) -> Result<String, AccountError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AccountError::Validation { field, reason: "must not be empty" });
    }
    Ok(name.to_owned())
}

fn check_password(raw: &str) -> Result<(), AccountError> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::Validation {
            field: "password",
            reason: "must be at least 8 characters",
        });
    }
    Ok(())
}

/// Validate a sign-up request and return it with normalized fields.
pub fn validate_signup(req: SignupRequest) -> Result<SignupRequest, AccountError> {
    check_password(&req.password)?;
    Ok(SignupRequest {
        email: normalize_email(&req.email)?,
        first_name: normalize_name("first_name", &req.first_name)?,
        last_name: normalize_name("last_name", &req.last_name)?,
        password: req.password,
    })
}

/// Validate an update request and return it with normalized fields.
pub fn validate_update(req: UpdateUserRequest) -> Result<UpdateUserRequest, AccountError> {
    if req.is_empty() {
        return Err(AccountError::Validation {
            field: "body",
            reason: "must change at least one of first_name, last_name, password",
        });
    }
    if let Some(password) = &req.password {
        check_password(password)?;
    }
    Ok(UpdateUserRequest {
        first_name: req.first_name.map(|n| normalize_name("first_name", &n)).transpose()?,
        last_name: req.last_name.map(|n| normalize_name("last_name", &n)).transpose()?,
        password: req.password,
    })
}
