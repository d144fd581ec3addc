//! Handlers scoped to the calling user.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reelvault_db::repositories::RatingRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
pub async fn get_me(auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse::new(auth.user)))
}

/// GET /api/v1/me/history
///
/// Every movie the caller has rated or marked watched, most recent first.
pub async fn watch_history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let history = RatingRepo::history_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(history)))
}
