use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::info;

use parley_types::api::{
    SetEmailRequest, SetHandleRequest, SetNameRequest, UserProfileQuery, UserProfileResponse,
    UsersAllResponse,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::SessionToken;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<UsersAllResponse>, ApiError> {
    let users = state.db.with_data(|data| data.list_users(&token))?;
    Ok(Json(UsersAllResponse { users }))
}

pub async fn user_profile(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiQuery(query): ApiQuery<UserProfileQuery>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = state
        .db
        .with_data(|data| data.user_profile(&token, query.u_id))?;
    Ok(Json(UserProfileResponse { user }))
}

pub async fn set_handle(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<SetHandleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .with_data_mut(|data| data.set_handle(&token, &req.handle_str))?;

    info!("Handle changed to {}", req.handle_str);
    Ok(Json(serde_json::json!({})))
}

pub async fn set_email(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<SetEmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .with_data_mut(|data| data.set_email(&token, &req.email))?;

    info!("Email changed to <{}>", req.email);
    Ok(Json(serde_json::json!({})))
}

pub async fn set_name(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<SetNameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .with_data_mut(|data| data.set_name(&token, &req.name_first, &req.name_last))?;
    Ok(Json(serde_json::json!({})))
}
