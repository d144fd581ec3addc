//! Route definitions for the admin surface. Every handler requires the
//! `admin` role via `RequireAdmin`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /errors                -> list_errors
/// GET    /errors/{id}           -> get_error
/// GET    /users                 -> list_users
/// PUT    /users/{id}/role       -> update_user_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/errors", get(admin::list_errors))
        .route("/errors/{id}", get(admin::get_error))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", put(admin::update_user_role))
}
