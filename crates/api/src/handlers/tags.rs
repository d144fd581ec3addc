//! Handlers for catalog tags.
//!
//! Tags are created on first use and keyed by their normalized name, so
//! applying `"Film Noir"` and `"film noir"` hits the same tag.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reelvault_core::error::CoreError;
use reelvault_core::tags::validate_tag_name;
use reelvault_db::repositories::TagRepo;
use serde::Deserialize;

use super::movies::ensure_movie_exists;
use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyTagsRequest {
    pub tag_names: Vec<String>,
}

/// GET /api/v1/tags
///
/// All tags, most used first.
pub async fn list_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(tags)))
}

/// GET /api/v1/movies/{id}/tags
pub async fn get_movie_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    ensure_movie_exists(&state.pool, movie_id).await?;

    let tags = TagRepo::for_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse::new(tags)))
}

/// POST /api/v1/movies/{id}/tags
///
/// Apply one or more tags. Already-applied tags are left alone. Responds
/// with the movie's full tag list.
pub async fn apply_movie_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<ApplyTagsRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    let Json(input) = body?;

    if input.tag_names.is_empty() {
        return Err(AppError::BadRequest("tag_names must not be empty".into()));
    }
    for name in &input.tag_names {
        validate_tag_name(name).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    ensure_movie_exists(&state.pool, movie_id).await?;

    let mut newly_applied = 0usize;
    for name in &input.tag_names {
        let tag = TagRepo::create_or_get(&state.pool, name, Some(auth.user_id)).await?;
        if TagRepo::apply(&state.pool, movie_id, tag.id, Some(auth.user_id)).await? {
            newly_applied += 1;
        }
    }

    tracing::info!(movie_id, newly_applied, user_id = auth.user_id, "Tags applied");

    let tags = TagRepo::for_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse::new(tags)))
}

/// DELETE /api/v1/movies/{id}/tags/{tag_id}
pub async fn remove_movie_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((raw_movie_id, raw_tag_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_movie_id, "movie id")?;
    let tag_id = parse_id(&raw_tag_id, "tag id")?;

    if !TagRepo::remove(&state.pool, movie_id, tag_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie tag",
            id: tag_id,
        }));
    }

    tracing::info!(movie_id, tag_id, user_id = auth.user_id, "Tag removed");

    Ok(StatusCode::NO_CONTENT)
}
