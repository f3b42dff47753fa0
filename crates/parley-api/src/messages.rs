use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::{debug, info};

use parley_types::api::{MessageEditRequest, MessageRemoveQuery, SendDmRequest, SendDmResponse};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::SessionToken;

pub async fn send_dm(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<SendDmRequest>,
) -> Result<Json<SendDmResponse>, ApiError> {
    let sent_at = chrono::Utc::now().timestamp();

    let message_id = state.db.with_data_mut(|data| {
        data.send_dm_message(&token, req.dm_id, &req.message, sent_at)
    })?;

    debug!("Message {} appended to dm {}", message_id, req.dm_id);
    Ok(Json(SendDmResponse { message_id }))
}

pub async fn edit_message(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiJson(req): ApiJson<MessageEditRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.with_data_mut(|data| {
        data.edit_dm_message(&token, req.message_id, &req.message)
    })?;

    if req.message.is_empty() {
        info!("Message {} removed by empty edit", req.message_id);
    } else {
        debug!("Message {} edited", req.message_id);
    }
    Ok(Json(serde_json::json!({})))
}

pub async fn remove_message(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    ApiQuery(query): ApiQuery<MessageRemoveQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .db
        .with_data_mut(|data| data.remove_dm_message(&token, query.message_id))?;

    info!("Message {} removed", query.message_id);
    Ok(Json(serde_json::json!({})))
}
