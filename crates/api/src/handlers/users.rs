use accounts::{PublicUser, SignupRequest, UpdateUserRequest};
use axum::{extract::State, http::StatusCode, Json};
use super::AppState;
use crate::{auth::CurrentUser, error::ApiError, extract::ApiJson};

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let user = accounts::signup(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Credentials are checked by the extractor; reaching the body means they
/// were valid.
pub async fn login(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}

pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let updated = accounts::update_profile(&state.pool, user.id, payload).await?;
    Ok(Json(updated))
}
