pub mod admin;
pub mod health;
pub mod me;
pub mod movies;
pub mod tags;
pub mod tmdb;
pub mod vaults;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /me                                              current user
/// /me/history                                      watch history
///
/// /vaults                                          list, create
/// /vaults/{id}                                     get, update, delete
/// /vaults/{id}/movies                              list, add
/// /vaults/{id}/movies/{movie_id}                   remove
///
/// /tmdb/search                                     search (POST)
/// /tmdb/movies/{id}                                details
/// /tmdb/watch-providers/{movie_id}                 watch providers
///
/// /movies                                          list, create
/// /movies/import                                   import from TMDB (POST)
/// /movies/{id}                                     get, update, delete (admin)
/// /movies/{id}/tags                                list, apply
/// /movies/{id}/tags/{tag_id}                       remove
/// /movies/{id}/rating                              set, delete
/// /movies/{id}/oscars                              list, create (admin)
///
/// /tags                                            list
///
/// /admin/errors                                    list (admin only)
/// /admin/errors/{id}                               get
/// /admin/users                                     list
/// /admin/users/{id}/role                           update role (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/me", me::router())
        .nest("/vaults", vaults::router())
        .nest("/tmdb", tmdb::router())
        .nest("/movies", movies::router())
        .nest("/tags", tags::router())
        .nest("/admin", admin::router())
}
