use axum::extract::{FromRequest, FromRequestParts, Query};

use crate::error::ApiError;

/// `axum::Json` whose rejection renders as an `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` whose rejection renders as an `{"error": ...}` body.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
