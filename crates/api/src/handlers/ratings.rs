//! Handlers for the caller's rating and watch record of a catalog movie.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reelvault_core::error::CoreError;
use reelvault_core::rating::validate_rating;
use reelvault_core::release_date::parse_date_field;
use reelvault_db::models::rating::UpsertRating;
use reelvault_db::repositories::RatingRepo;
use serde::Deserialize;

use super::movies::ensure_movie_exists;
use super::{parse_id, trim_optional};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    /// 0.5 to 10.0 in half steps.
    pub rating: Option<f64>,
    pub watched_at: Option<String>,
    pub notes: Option<String>,
}

/// PUT /api/v1/movies/{id}/rating
///
/// Replaces the caller's previous record for this movie.
pub async fn put_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<RatingRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    let Json(input) = body?;

    if let Some(rating) = input.rating {
        validate_rating(rating).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    let watched_at = parse_date_field("watched_at", input.watched_at.as_deref())?;
    let notes = trim_optional(input.notes);

    if input.rating.is_none() && watched_at.is_none() && notes.is_none() {
        return Err(AppError::BadRequest(
            "Provide at least one of rating, watched_at, or notes".into(),
        ));
    }

    ensure_movie_exists(&state.pool, movie_id).await?;

    let rating = RatingRepo::upsert(
        &state.pool,
        &UpsertRating {
            user_id: auth.user_id,
            movie_id,
            rating: input.rating,
            watched_at,
            notes,
        },
    )
    .await?;

    tracing::info!(movie_id, user_id = auth.user_id, "Rating saved");

    Ok(Json(DataResponse::new(rating)))
}

/// DELETE /api/v1/movies/{id}/rating
pub async fn delete_rating(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;

    if !RatingRepo::delete(&state.pool, auth.user_id, movie_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Rating for movie",
            id: movie_id,
        }));
    }

    tracing::info!(movie_id, user_id = auth.user_id, "Rating deleted");

    Ok(StatusCode::NO_CONTENT)
}
