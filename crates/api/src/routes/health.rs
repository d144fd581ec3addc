//! `GET /health`: liveness plus the state of the two backing services.

use std::time::Instant;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"` when the database answers, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub tmdb: TmdbHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub healthy: bool,
    pub latency_ms: u64,
}

/// TMDB is never called from here; this only reflects configuration.
#[derive(Debug, Serialize)]
pub struct TmdbHealth {
    pub configured: bool,
    pub timeout_secs: u64,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let started = Instant::now();
    let healthy = match reelvault_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let tmdb = &state.config.tmdb;

    Json(HealthReport {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            healthy,
            latency_ms,
        },
        tmdb: TmdbHealth {
            configured: !tmdb.api_key.trim().is_empty(),
            timeout_secs: tmdb.timeout_secs,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
