use crate::auth::identity::AuthConfig;

/// Server configuration loaded from environment variables.
///
/// Defaults suit local development; production overrides via the
/// environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Identity-token verification settings.
    pub auth: AuthConfig,
    /// TMDB client settings.
    pub tmdb: TmdbConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`AuthConfig::from_env`] and [`TmdbConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth: AuthConfig::from_env(),
            tmdb: TmdbConfig::from_env(),
        }
    }
}

/// Default TMDB request timeout in seconds.
const DEFAULT_TMDB_TIMEOUT_SECS: u64 = 10;

/// Settings for the outbound TMDB client.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl TmdbConfig {
    /// | Env Var             | Required | Default                        |
    /// |---------------------|----------|--------------------------------|
    /// | `TMDB_API_KEY`      | **yes**  | --                             |
    /// | `TMDB_BASE_URL`     | no       | `https://api.themoviedb.org/3` |
    /// | `TMDB_TIMEOUT_SECS` | no       | `10`                           |
    ///
    /// # Panics
    ///
    /// Panics if `TMDB_API_KEY` is not set or a value fails to parse.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("TMDB_API_KEY").expect("TMDB_API_KEY must be set in the environment");

        let base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| reelvault_tmdb::DEFAULT_BASE_URL.into());

        let timeout_secs: u64 = std::env::var("TMDB_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TMDB_TIMEOUT_SECS.to_string())
            .parse()
            .expect("TMDB_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            timeout_secs,
        }
    }
}
