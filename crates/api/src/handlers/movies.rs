//! Handlers for the shared movie catalog and its Oscar nominations.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reelvault_core::error::CoreError;
use reelvault_core::genre::Genre;
use reelvault_core::pagination::{
    clamp_limit, clamp_offset, PageInfo, DEFAULT_MOVIE_LIMIT, MAX_MOVIE_LIMIT,
};
use reelvault_core::release_date::parse_release_date;
use reelvault_core::tags::normalize_tag_name;
use reelvault_core::types::DbId;
use reelvault_core::validation::MAX_TITLE_LEN;
use reelvault_db::models::movie::{CreateMovie, Movie, MovieQuery, UpdateMovie};
use reelvault_db::models::oscar::{CreateOscarNomination, OscarNomination};
use reelvault_db::models::rating::MovieRating;
use reelvault_db::models::tag::TagInfo;
use reelvault_db::repositories::{MovieRepo, OscarRepo, RatingRepo, TagRepo};
use reelvault_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_id, trim_optional, validate_body};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MovieListParams {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub pagination: PageInfo,
}

/// A catalog movie with everything attached to it.
#[derive(Debug, Serialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub tags: Vec<TagInfo>,
    pub oscars: Vec<OscarNomination>,
    /// The caller's own rating, if any.
    pub my_rating: Option<MovieRating>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(range(min = 1, message = "must be a positive TMDB id"))]
    pub tmdb_id: Option<i64>,
    #[validate(length(min = 1, max = MAX_TITLE_LEN, message = "must not be empty"))]
    pub title: String,
    pub imdb_id: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LEN, message = "must not be empty"))]
    pub title: Option<String>,
    pub imdb_id: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImportMovieRequest {
    #[validate(range(min = 1, message = "must be a positive TMDB id"))]
    pub tmdb_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOscarRequest {
    #[validate(range(min = 1929, max = 2100, message = "must be a ceremony year"))]
    pub ceremony_year: i32,
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub category: String,
    pub nominee: Option<String>,
    #[serde(default)]
    pub is_winner: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a catalog movie or `NotFound`.
pub(crate) async fn ensure_movie_exists(pool: &DbPool, movie_id: DbId) -> AppResult<Movie> {
    MovieRepo::find_by_id(pool, movie_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }))
}

async fn ensure_tmdb_id_free(pool: &DbPool, tmdb_id: i64) -> AppResult<()> {
    if MovieRepo::find_by_tmdb_id(pool, tmdb_id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A movie with TMDB id {tmdb_id} is already in the catalog"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/movies?search=&tag=&limit=&offset=
pub async fn list_movies(
    _auth: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<MovieListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params?;
    let query = MovieQuery {
        search: trim_optional(params.search),
        tag: trim_optional(params.tag).map(|t| normalize_tag_name(&t)),
        limit: clamp_limit(params.limit, DEFAULT_MOVIE_LIMIT, MAX_MOVIE_LIMIT),
        offset: clamp_offset(params.offset),
    };

    let movies = MovieRepo::list(&state.pool, &query).await?;
    let total = MovieRepo::count(&state.pool, &query).await?;

    Ok(Json(DataResponse::new(MoviePage {
        movies,
        pagination: PageInfo::new(total, query.limit, query.offset),
    })))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    let movie = ensure_movie_exists(&state.pool, movie_id).await?;

    let tags = TagRepo::for_movie(&state.pool, movie_id).await?;
    let oscars = OscarRepo::list_for_movie(&state.pool, movie_id).await?;
    let my_rating = RatingRepo::find(&state.pool, auth.user_id, movie_id).await?;

    Ok(Json(DataResponse::new(MovieDetail {
        movie,
        tags,
        oscars,
        my_rating,
    })))
}

/// POST /api/v1/movies
pub async fn create_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(mut input) = body?;
    input.title = input.title.trim().to_string();
    validate_body(&input)?;

    if let Some(tmdb_id) = input.tmdb_id {
        ensure_tmdb_id_free(&state.pool, tmdb_id).await?;
    }

    let create = CreateMovie {
        tmdb_id: input.tmdb_id,
        imdb_id: trim_optional(input.imdb_id),
        title: input.title,
        director: trim_optional(input.director),
        release_date: parse_release_date(input.release_date.as_deref())?,
        runtime: input.runtime,
        overview: input.overview,
        poster_path: trim_optional(input.poster_path),
        backdrop_path: trim_optional(input.backdrop_path),
        genres: input.genres,
        vote_average: input.vote_average,
        created_by: Some(auth.user_id),
    };
    let movie = MovieRepo::create(&state.pool, &create).await?;

    tracing::info!(movie_id = movie.id, user_id = auth.user_id, "Catalog movie created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(movie))))
}

/// POST /api/v1/movies/import
///
/// Copy a movie from TMDB into the catalog, director and genres included.
pub async fn import_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<ImportMovieRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;
    validate_body(&input)?;

    ensure_tmdb_id_free(&state.pool, input.tmdb_id).await?;

    let details = state.tmdb.get_movie(input.tmdb_id).await?;

    let release_date = parse_release_date(details.release_date.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(tmdb_id = details.id, error = %e, "Ignoring unparseable TMDB release date");
        None
    });

    let create = CreateMovie {
        tmdb_id: Some(details.id),
        imdb_id: details.imdb_id,
        title: details.title,
        director: details.director,
        release_date,
        runtime: details.runtime,
        overview: details.overview,
        poster_path: details.poster_path,
        backdrop_path: details.backdrop_path,
        genres: details.genres,
        vote_average: Some(details.vote_average),
        created_by: Some(auth.user_id),
    };
    let movie = MovieRepo::create(&state.pool, &create).await?;

    tracing::info!(
        movie_id = movie.id,
        tmdb_id = input.tmdb_id,
        user_id = auth.user_id,
        "Movie imported from TMDB",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(movie))))
}

/// PUT /api/v1/movies/{id}
///
/// Admin only.
pub async fn update_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    let Json(mut input) = body?;
    input.title = input.title.map(|t| t.trim().to_string());
    validate_body(&input)?;

    let update = UpdateMovie {
        title: input.title,
        director: input.director,
        release_date: parse_release_date(input.release_date.as_deref())?,
        runtime: input.runtime,
        overview: input.overview,
        poster_path: input.poster_path,
        backdrop_path: input.backdrop_path,
        genres: input.genres,
        vote_average: input.vote_average,
        imdb_id: input.imdb_id,
    };
    let movie = MovieRepo::update(&state.pool, movie_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }))?;

    tracing::info!(movie_id, user_id = admin.user_id, "Catalog movie updated");

    Ok(Json(DataResponse::new(movie)))
}

/// DELETE /api/v1/movies/{id}
///
/// Admin only. Tags, ratings, and nominations go with it.
pub async fn delete_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    if !MovieRepo::delete(&state.pool, movie_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }));
    }

    tracing::info!(movie_id, user_id = admin.user_id, "Catalog movie deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Oscar nominations
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/{id}/oscars
pub async fn list_oscars(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    ensure_movie_exists(&state.pool, movie_id).await?;

    let nominations = OscarRepo::list_for_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse::new(nominations)))
}

/// POST /api/v1/movies/{id}/oscars
///
/// Admin only.
pub async fn create_oscar(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<CreateOscarRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let movie_id = parse_id(&raw_id, "movie id")?;
    let Json(mut input) = body?;
    input.category = input.category.trim().to_string();
    validate_body(&input)?;

    ensure_movie_exists(&state.pool, movie_id).await?;

    let nomination = OscarRepo::create(
        &state.pool,
        &CreateOscarNomination {
            movie_id,
            ceremony_year: input.ceremony_year,
            category: input.category,
            nominee: trim_optional(input.nominee),
            is_winner: input.is_winner,
        },
    )
    .await?;

    tracing::info!(
        movie_id,
        nomination_id = nomination.id,
        user_id = admin.user_id,
        "Oscar nomination recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(nomination))))
}
