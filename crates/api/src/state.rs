use std::sync::Arc;

use reelvault_tmdb::TmdbApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: reelvault_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Movie metadata provider.
    pub tmdb: Arc<dyn TmdbApi>,
}
