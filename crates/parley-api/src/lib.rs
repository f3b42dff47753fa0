pub mod auth;
pub mod dms;
pub mod error;
pub mod extract;
pub mod messages;
pub mod middleware;
pub mod other;
pub mod users;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::auth::AppState;
use crate::middleware::require_session;

/// All routes. Everything except register, login, clear and health needs a
/// `token` header.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register/v3", post(auth::register))
        .route("/auth/login/v3", post(auth::login))
        .route("/clear/v1", delete(other::clear))
        .route("/health", get(other::health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/auth/logout/v2", post(auth::logout))
        .route("/dm/create/v2", post(dms::create_dm))
        .route("/dm/list/v2", get(dms::list_dms))
        .route("/dm/details/v2", get(dms::dm_details))
        .route("/dm/remove/v2", delete(dms::remove_dm))
        .route("/dm/leave/v2", post(dms::leave_dm))
        .route("/dm/messages/v2", get(dms::dm_messages))
        .route("/message/senddm/v2", post(messages::send_dm))
        .route("/message/edit/v1", put(messages::edit_message))
        .route("/message/remove/v1", delete(messages::remove_message))
        .route("/users/all/v2", get(users::list_users))
        .route("/user/profile/v3", get(users::user_profile))
        .route("/user/profile/sethandle/v2", put(users::set_handle))
        .route("/user/profile/setemail/v2", put(users::set_email))
        .route("/user/profile/setname/v2", put(users::set_name))
        .layer(axum_middleware::from_fn(require_session))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
