use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET    /                  -> get_me
/// GET    /history           -> watch_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_me))
        .route("/history", get(me::watch_history))
}
