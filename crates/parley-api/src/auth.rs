use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::{error, info, warn};
use uuid::Uuid;

use parley_db::users::{validate_email, validate_name, validate_password};
use parley_db::{Database, Error};
use parley_types::api::{AuthResponse, LoginRequest, RegisterRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::SessionToken;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // Validate input before paying for a hash
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_name(&req.name_first)?;
    validate_name(&req.name_last)?;
    if state.db.with_data(|data| data.user_by_email(&req.email).is_some()) {
        return Err(Error::EmailInUse.into());
    }

    let password = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })??;

    // Email uniqueness is checked again here, under the store lock.
    let token = new_token();
    let user_id = state.db.with_data_mut(|data| {
        data.register_user(
            &req.email,
            &password_hash,
            &req.name_first,
            &req.name_last,
            &token,
        )
    })?;

    info!("Registered user {} <{}>", user_id, req.email);
    Ok(Json(AuthResponse {
        token,
        auth_user_id: user_id,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user_id, password_hash) = state
        .db
        .with_data(|data| {
            data.user_by_email(&req.email)
                .map(|u| (u.id, u.password_hash.clone()))
        })
        .ok_or(Error::IncorrectCredentials)?;

    let password = req.password;
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?;

    if !verified {
        warn!("Failed login for user {}", user_id);
        return Err(Error::IncorrectCredentials.into());
    }

    let token = new_token();
    state
        .db
        .with_data_mut(|data| data.start_session(user_id, &token))?;

    info!("User {} logged in", user_id);
    Ok(Json(AuthResponse {
        token,
        auth_user_id: user_id,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = state.db.with_data_mut(|data| data.end_session(&token))?;

    info!("User {} logged out", user_id);
    Ok(Json(serde_json::json!({})))
}

fn new_token() -> String {
    Uuid::new_v4().to_string()
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            ApiError::Internal
        })
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Corrupt password hash in store: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
