//! Route definitions for vaults.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::vaults;
use crate::state::AppState;

/// Routes mounted at `/vaults`.
///
/// ```text
/// GET    /                          -> list_vaults
/// POST   /                          -> create_vault
/// GET    /{id}                      -> get_vault
/// PUT    /{id}                      -> update_vault
/// DELETE /{id}                      -> delete_vault
/// GET    /{id}/movies               -> list_vault_movies
/// POST   /{id}/movies               -> add_vault_movie
/// DELETE /{id}/movies/{movie_id}    -> remove_vault_movie
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vaults::list_vaults).post(vaults::create_vault))
        .route(
            "/{id}",
            get(vaults::get_vault)
                .put(vaults::update_vault)
                .delete(vaults::delete_vault),
        )
        .route(
            "/{id}/movies",
            get(vaults::list_vault_movies).post(vaults::add_vault_movie),
        )
        .route("/{id}/movies/{movie_id}", delete(vaults::remove_vault_movie))
}
