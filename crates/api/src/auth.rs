//! HTTP Basic authentication.
//!
//! Credentials are checked on every request; there are no sessions.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use db::models::UserRow;

use crate::{error::ApiError, handlers::AppState};

/// Extract `(username, password)` from an `Authorization: Basic` header.
///
/// Returns `None` for a missing header, another scheme, bad base64, non
/// UTF-8 payloads or a payload without `:`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_owned(), password.to_owned()))
}

/// The account behind a request's Basic credentials.
///
/// Rejects with `401` and `WWW-Authenticate: Basic` when the header is
/// missing or the credentials do not match.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRow);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (email, password) = basic_credentials(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let state = AppState::from_ref(state);
        let user = accounts::authenticate(&state.pool, &email, &password).await?;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn decodes_basic_credentials() {
        let encoded = STANDARD.encode("email@email.com:pass:with:colons");
        let creds = basic_credentials(&with_auth(&format!("Basic {encoded}")));
        assert_eq!(
            creds,
            Some(("email@email.com".to_string(), "pass:with:colons".to_string()))
        );
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("a:b");
        assert!(basic_credentials(&with_auth(&format!("basic {encoded}"))).is_some());
    }

    #[test]
    fn rejects_unusable_headers() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&with_auth("Bearer token-1")), None);
        assert_eq!(basic_credentials(&with_auth("Basic !!!not-base64")), None);

        let no_colon = STANDARD.encode("just-a-user");
        assert_eq!(basic_credentials(&with_auth(&format!("Basic {no_colon}"))), None);
    }
}
