use axum::{extract::State, http::StatusCode};
use super::AppState;

/// Sent on every `/healthz` response, including method-not-allowed ones.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// `GET /healthz` — 200 when the database answers, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> StatusCode {
    if db::pool::check_connection(&state.pool).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
