use axum::{Json, extract::State, response::IntoResponse};
use tracing::info;

use crate::auth::AppState;
use crate::error::ApiError;

/// DELETE /clear/v1: wipe every user and DM. Id sequences keep counting.
pub async fn clear(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.db.with_data_mut(|data| {
        data.clear();
        Ok(())
    })?;

    info!("Data store cleared");
    Ok(Json(serde_json::json!({})))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
