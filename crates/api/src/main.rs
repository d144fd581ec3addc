use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reelvault_api::config::ServerConfig;
use reelvault_api::router::build_app_router;
use reelvault_api::state::AppState;
use reelvault_tmdb::TmdbClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reelvault_api=debug,reelvault_tmdb=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(env_filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .map(|v| {
            v.parse()
                .expect("DATABASE_MAX_CONNECTIONS must be a valid u32")
        })
        .unwrap_or(reelvault_db::DEFAULT_MAX_CONNECTIONS);

    let pool = reelvault_db::create_pool(&database_url, max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections, "Database connection pool created");

    reelvault_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    reelvault_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- TMDB client ---
    let tmdb = TmdbClient::new(
        config.tmdb.base_url.clone(),
        config.tmdb.api_key.clone(),
        Duration::from_secs(config.tmdb.timeout_secs),
    )
    .expect("Failed to build TMDB HTTP client");
    tracing::info!(base_url = %config.tmdb.base_url, "TMDB client ready");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tmdb: Arc::new(tmdb),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
