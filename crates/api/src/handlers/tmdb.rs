//! Handlers for the TMDB pass-through endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reelvault_tmdb::{search_movies, SearchOutcome};
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free text, a bare TMDB id, or a TMDB movie URL.
    #[serde(default)]
    pub query: String,
    /// Use the year-aware re-ranked search (default: `true`).
    pub enhanced: Option<bool>,
}

/// Search responses are flat rather than wrapped in `data`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// POST /api/v1/tmdb/search
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    let enhanced = input.enhanced.unwrap_or(true);

    let outcome = search_movies(state.tmdb.as_ref(), &input.query, enhanced).await?;

    tracing::debug!(
        method = ?outcome.search_method,
        results = outcome.results.len(),
        "TMDB search completed",
    );

    Ok(Json(SearchResponse {
        success: true,
        outcome,
    }))
}

/// GET /api/v1/tmdb/movies/{id}
pub async fn get_movie(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tmdb_id = parse_id(&raw_id, "TMDB id")?;
    let details = state.tmdb.get_movie(tmdb_id).await?;
    Ok(Json(DataResponse::new(details)))
}

/// GET /api/v1/tmdb/watch-providers/{movie_id}
pub async fn watch_providers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tmdb_id = parse_id(&raw_id, "movie id")?;
    let providers = state.tmdb.get_watch_providers(tmdb_id).await?;
    Ok(Json(DataResponse::new(providers)))
}
