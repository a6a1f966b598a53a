//! HTTP error type and its mapping onto status codes.

use accounts::AccountError;
use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Challenge sent with every 401.
pub const BASIC_CHALLENGE: &str = "Basic";

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable `Authorization: Basic` header on a protected route.
    #[error("authentication required")]
    Unauthorized,

    /// The body was not JSON of the expected shape.
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Account(#[from] AccountError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Json(rejection) => rejection.status(),
            Self::Account(e) => match e {
                AccountError::Validation { .. } => StatusCode::BAD_REQUEST,
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::NotFound(_) => StatusCode::NOT_FOUND,
                // A rejected insert is reported as the store being unable to
                // take the write, the same as any other persistence failure.
                AccountError::EmailTaken | AccountError::Database(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                AccountError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!("Request failed: {self}");
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "service unavailable".to_string(),
                _ => "internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
        }
        response
    }
}
