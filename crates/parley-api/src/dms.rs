use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::{debug, info};

use parley_types::api::{
    DmCreateRequest, DmCreateResponse, DmDetailsResponse, DmLeaveRequest, DmListResponse,
    DmMessagesQuery, DmMessagesResponse, DmQuery,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::SessionToken;

pub async fn create_dm(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<DmCreateRequest>,
) -> Result<Json<DmCreateResponse>, ApiError> {
    let dm_id = state
        .db
        .with_data_mut(|data| data.create_dm(&token, &req.u_ids))?;

    info!("Created dm {} with {} invited members", dm_id, req.u_ids.len());
    Ok(Json(DmCreateResponse { dm_id }))
}

pub async fn list_dms(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<DmListResponse>, ApiError> {
    let dms = state.db.with_data(|data| data.list_dms(&token))?;
    Ok(Json(DmListResponse { dms }))
}

pub async fn dm_details(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiQuery(query): ApiQuery<DmQuery>,
) -> Result<Json<DmDetailsResponse>, ApiError> {
    let details = state
        .db
        .with_data(|data| data.dm_details(&token, query.dm_id))?;
    Ok(Json(details))
}

pub async fn remove_dm(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiQuery(query): ApiQuery<DmQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .with_data_mut(|data| data.remove_dm(&token, query.dm_id))?;

    info!("Removed dm {}", query.dm_id);
    Ok(Json(serde_json::json!({})))
}

pub async fn leave_dm(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<DmLeaveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .with_data_mut(|data| data.leave_dm(&token, req.dm_id))?;

    info!("A member left dm {}", req.dm_id);
    Ok(Json(serde_json::json!({})))
}

/// GET /dm/messages/v2?dmId=&start=: one page of the DM's log for the
/// user holding the session token.
pub async fn dm_messages(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiQuery(query): ApiQuery<DmMessagesQuery>,
) -> Result<Json<DmMessagesResponse>, ApiError> {
    let page = state.db.with_data(|data| {
        let user_id = data.authenticate(&token)?;
        data.dm_messages(user_id, query.dm_id, query.start)
    })?;

    debug!(
        "Paged dm {} from {}: {} messages, end {}",
        query.dm_id,
        query.start,
        page.messages.len(),
        page.end
    );
    Ok(Json(page))
}
