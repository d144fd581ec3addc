//! Handlers for vaults and the movies inside them.
//!
//! Every lookup is scoped to the caller: a vault that exists but belongs
//! to someone else is reported exactly like one that does not exist.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reelvault_core::error::CoreError;
use reelvault_core::genre::Genre;
use reelvault_core::release_date::parse_release_date;
use reelvault_core::types::DbId;
use reelvault_core::validation::{MAX_TITLE_LEN, MAX_VAULT_DESCRIPTION_LEN, MAX_VAULT_NAME_LEN};
use reelvault_db::models::vault::{CreateVault, UpdateVault, Vault};
use reelvault_db::models::vault_movie::CreateVaultMovie;
use reelvault_db::repositories::{VaultMovieRepo, VaultRepo};
use reelvault_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use super::{parse_id, trim_optional, validate_body};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVaultRequest {
    #[validate(length(min = 1, max = MAX_VAULT_NAME_LEN, message = "must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = MAX_VAULT_DESCRIPTION_LEN, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVaultRequest {
    #[validate(length(min = 1, max = MAX_VAULT_NAME_LEN, message = "must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = MAX_VAULT_DESCRIPTION_LEN, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Body of `POST /vaults/{id}/movies`. Only `tmdb_id` and `title` are required.
#[derive(Debug, Deserialize, Validate)]
pub struct AddVaultMovieRequest {
    #[validate(range(min = 1, message = "must be a positive TMDB id"))]
    pub tmdb_id: i64,
    #[validate(length(min = 1, max = MAX_TITLE_LEN, message = "must not be empty"))]
    pub title: String,
    pub director: Option<String>,
    /// ISO date or RFC 3339 timestamp; only the calendar date is kept.
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub imdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VaultMoviesParams {
    #[serde(default)]
    pub include_collection_status: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a vault the caller owns, or `NotFound`.
async fn ensure_owned_vault(pool: &DbPool, vault_id: DbId, user_id: DbId) -> AppResult<Vault> {
    VaultRepo::find_owned(pool, vault_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vault",
            id: vault_id,
        }))
}

// ---------------------------------------------------------------------------
// Vault CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/vaults
///
/// The caller's vaults, most recently updated first, with movie counts and
/// poster previews.
pub async fn list_vaults(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let vaults = VaultRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(vaults)))
}

/// POST /api/v1/vaults
pub async fn create_vault(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<CreateVaultRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(mut input) = body?;
    input.name = input.name.trim().to_string();
    input.description = trim_optional(input.description);
    validate_body(&input)?;

    let vault = VaultRepo::create(
        &state.pool,
        &CreateVault {
            user_id: auth.user_id,
            name: input.name,
            description: input.description,
        },
    )
    .await?;

    tracing::info!(vault_id = vault.id, user_id = auth.user_id, "Vault created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(vault))))
}

/// GET /api/v1/vaults/{id}
pub async fn get_vault(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let vault_id = parse_id(&raw_id, "vault id")?;
    let vault = VaultRepo::find_owned_summary(&state.pool, vault_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vault",
            id: vault_id,
        }))?;

    Ok(Json(DataResponse::new(vault)))
}

/// PUT /api/v1/vaults/{id}
pub async fn update_vault(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateVaultRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let vault_id = parse_id(&raw_id, "vault id")?;
    let Json(mut input) = body?;
    input.name = input.name.map(|n| n.trim().to_string());
    input.description = input.description.map(|d| d.trim().to_string());
    validate_body(&input)?;

    let update = UpdateVault {
        name: input.name,
        description: input.description,
    };
    let vault = VaultRepo::update_owned(&state.pool, vault_id, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vault",
            id: vault_id,
        }))?;

    tracing::info!(vault_id, user_id = auth.user_id, "Vault updated");

    Ok(Json(DataResponse::new(vault)))
}

/// DELETE /api/v1/vaults/{id}
///
/// Removes the vault and, by cascade, every movie in it.
pub async fn delete_vault(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let vault_id = parse_id(&raw_id, "vault id")?;
    if !VaultRepo::delete_owned(&state.pool, vault_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vault",
            id: vault_id,
        }));
    }

    tracing::info!(vault_id, user_id = auth.user_id, "Vault deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Vault movies
// ---------------------------------------------------------------------------

/// GET /api/v1/vaults/{id}/movies?include_collection_status=
///
/// `in_collection` is relative to the caller's own catalog entries and ratings.
pub async fn list_vault_movies(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    params: Result<Query<VaultMoviesParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let vault_id = parse_id(&raw_id, "vault id")?;
    let Query(params) = params?;
    ensure_owned_vault(&state.pool, vault_id, auth.user_id).await?;

    let collection_owner = params.include_collection_status.then_some(auth.user_id);
    let movies = VaultMovieRepo::list_for_vault(&state.pool, vault_id, collection_owner).await?;

    Ok(Json(DataResponse::new(movies)))
}

/// POST /api/v1/vaults/{id}/movies
///
/// The payload is validated first, then vault ownership is checked, then
/// the `(vault, tmdb_id)` pair must be new. A concurrent insert that slips
/// past the pre-check still fails on `uq_vault_movies_vault_tmdb` and is
/// reported as the same conflict.
pub async fn add_vault_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<AddVaultMovieRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let vault_id = parse_id(&raw_id, "vault id")?;
    let Json(mut input) = body?;
    input.title = input.title.trim().to_string();
    validate_body(&input)?;
    let release_date = parse_release_date(input.release_date.as_deref())?;

    ensure_owned_vault(&state.pool, vault_id, auth.user_id).await?;

    if VaultMovieRepo::find_by_vault_and_tmdb(&state.pool, vault_id, input.tmdb_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Movie {} is already in this vault",
            input.tmdb_id
        ))));
    }

    let create = CreateVaultMovie {
        vault_id,
        tmdb_id: input.tmdb_id,
        title: input.title,
        director: trim_optional(input.director),
        release_date,
        poster_path: trim_optional(input.poster_path),
        backdrop_path: trim_optional(input.backdrop_path),
        overview: input.overview,
        runtime: input.runtime,
        genres: input.genres,
        vote_average: input.vote_average,
        imdb_id: trim_optional(input.imdb_id),
    };
    let movie = VaultMovieRepo::create(&state.pool, &create).await?;
    VaultRepo::touch(&state.pool, vault_id).await?;

    tracing::info!(
        vault_id,
        vault_movie_id = movie.id,
        tmdb_id = movie.tmdb_id,
        user_id = auth.user_id,
        "Movie added to vault",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(movie))))
}

/// DELETE /api/v1/vaults/{id}/movies/{movie_id}
pub async fn remove_vault_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((raw_vault_id, raw_movie_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let vault_id = parse_id(&raw_vault_id, "vault id")?;
    let vault_movie_id = parse_id(&raw_movie_id, "movie id")?;

    let deleted =
        VaultMovieRepo::delete_owned(&state.pool, vault_movie_id, vault_id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vault movie",
            id: vault_movie_id,
        }));
    }
    VaultRepo::touch(&state.pool, vault_id).await?;

    tracing::info!(vault_id, vault_movie_id, user_id = auth.user_id, "Movie removed from vault");

    Ok(StatusCode::NO_CONTENT)
}
