use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tmdb;
use crate::state::AppState;

/// Routes mounted at `/tmdb`.
///
/// ```text
/// POST   /search                        -> search
/// GET    /movies/{id}                   -> get_movie
/// GET    /watch-providers/{movie_id}    -> watch_providers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", post(tmdb::search))
        .route("/movies/{id}", get(tmdb::get_movie))
        .route("/watch-providers/{movie_id}", get(tmdb::watch_providers))
}
