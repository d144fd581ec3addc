#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use reelvault_api::auth::identity::{issue_identity_token, AuthConfig};
use reelvault_api::config::{ServerConfig, TmdbConfig};
use reelvault_api::router::build_app_router;
use reelvault_api::state::AppState;
use reelvault_core::genre::Genre;
use reelvault_tmdb::types::{
    MovieDetails, Provider, RegionProviders, SearchPage, TmdbMovie, WatchProviders,
};
use reelvault_tmdb::{TmdbApi, TmdbError};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@test.com";

/// TMDB id the stub knows about.
pub const KNOWN_TMDB_ID: i64 = 27205;
/// TMDB id whose watch-provider lookup fails upstream.
pub const BROKEN_TMDB_ID: i64 = 500;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig {
            secret: TEST_SECRET.to_string(),
            issuer: None,
            audience: None,
            admin_emails: vec![ADMIN_EMAIL.to_string()],
        },
        tmdb: TmdbConfig {
            api_key: "unused".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
    }
}

// ---------------------------------------------------------------------------
// Stub TMDB
// ---------------------------------------------------------------------------

/// In-memory TMDB that knows a single movie and counts upstream calls.
#[derive(Default)]
pub struct StubTmdb {
    pub lookups: AtomicUsize,
    pub searches: AtomicUsize,
}

impl StubTmdb {
    pub fn upstream_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst) + self.searches.load(Ordering::SeqCst)
    }
}

pub fn inception() -> MovieDetails {
    MovieDetails {
        id: KNOWN_TMDB_ID,
        title: "Inception".to_string(),
        original_title: Some("Inception".to_string()),
        release_date: Some("2010-07-15".to_string()),
        overview: Some("A thief who steals corporate secrets.".to_string()),
        poster_path: Some("/inception.jpg".to_string()),
        backdrop_path: None,
        runtime: Some(148),
        genres: vec![Genre {
            id: 878,
            name: "Science Fiction".to_string(),
        }],
        vote_average: 8.4,
        vote_count: 35000,
        popularity: 90.0,
        imdb_id: Some("tt1375666".to_string()),
        director: Some("Christopher Nolan".to_string()),
    }
}

#[async_trait]
impl TmdbApi for StubTmdb {
    async fn search(&self, query: &str, _year: Option<i32>) -> Result<SearchPage, TmdbError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let mut movie: TmdbMovie = inception().into();
        movie.id = 1;
        movie.title = query.to_string();
        Ok(SearchPage {
            page: 1,
            results: vec![movie],
            total_results: 1,
            total_pages: 1,
        })
    }

    async fn get_movie(&self, id: i64) -> Result<MovieDetails, TmdbError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if id == KNOWN_TMDB_ID {
            Ok(inception())
        } else {
            Err(TmdbError::NotFound { id })
        }
    }

    async fn get_watch_providers(&self, id: i64) -> Result<WatchProviders, TmdbError> {
        if id == BROKEN_TMDB_ID {
            return Err(TmdbError::Api {
                status: 503,
                body: "upstream down".to_string(),
            });
        }
        let mut providers = WatchProviders {
            id,
            ..Default::default()
        };
        providers.results.insert(
            "US".to_string(),
            RegionProviders {
                link: Some("https://www.themoviedb.org/movie/27205/watch".to_string()),
                flatrate: vec![Provider {
                    provider_id: 8,
                    provider_name: "Netflix".to_string(),
                    logo_path: None,
                    display_priority: 1,
                }],
                ..Default::default()
            },
        );
        Ok(providers)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers and a stub
/// TMDB, using the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_tmdb(pool, Arc::new(StubTmdb::default()))
}

pub fn build_test_app_with_tmdb(pool: PgPool, tmdb: Arc<dyn TmdbApi>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tmdb,
    };
    build_app_router(state, &config)
}

/// Sign an identity token for `sub` the way the identity provider would.
pub fn token_for(sub: &str, email: &str) -> String {
    issue_identity_token(sub, email, Some("Test User"), 3600, &test_config().auth).unwrap()
}

pub fn user_token(sub: &str) -> String {
    token_for(sub, &format!("{sub}@test.com"))
}

pub fn admin_token() -> String {
    token_for("admin-sub", ADMIN_EMAIL)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
