//! Route definitions for the shared movie catalog.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{movies, ratings, tags};
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                          -> list_movies
/// POST   /                          -> create_movie
/// POST   /import                    -> import_movie
/// GET    /{id}                      -> get_movie
/// PUT    /{id}                      -> update_movie (admin only)
/// DELETE /{id}                      -> delete_movie (admin only)
/// GET    /{id}/tags                 -> get_movie_tags
/// POST   /{id}/tags                 -> apply_movie_tags
/// DELETE /{id}/tags/{tag_id}        -> remove_movie_tag
/// PUT    /{id}/rating               -> put_rating
/// DELETE /{id}/rating               -> delete_rating
/// GET    /{id}/oscars               -> list_oscars
/// POST   /{id}/oscars               -> create_oscar (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/import", post(movies::import_movie))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/{id}/tags",
            get(tags::get_movie_tags).post(tags::apply_movie_tags),
        )
        .route("/{id}/tags/{tag_id}", delete(tags::remove_movie_tag))
        .route(
            "/{id}/rating",
            put(ratings::put_rating).delete(ratings::delete_rating),
        )
        .route(
            "/{id}/oscars",
            get(movies::list_oscars).post(movies::create_oscar),
        )
}
