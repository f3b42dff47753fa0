use axum::{extract::Request, middleware::Next, response::Response};

use parley_db::Error;

use crate::error::ApiError;

/// Header carrying the session token on every protected route.
pub const TOKEN_HEADER: &str = "token";

/// Raw session token taken from the request. Handlers resolve it against the
/// store themselves so the check happens under the same lock as the operation.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Reject requests without a token header and stash the token for handlers.
pub async fn require_session(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(Error::InvalidToken)?
        .to_string();

    req.extensions_mut().insert(SessionToken(token));
    Ok(next.run(req).await)
}
