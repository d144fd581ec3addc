//! REST client for the TMDB v3 API.
//!
//! [`TmdbApi`] is the seam the HTTP layer depends on; [`TmdbClient`] is
//! the [`reqwest`] implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::enhanced;
use crate::error::TmdbError;
use crate::types::{MovieDetails, RawMovieDetails, SearchPage, WatchProviders};

/// Public TMDB v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Operations the rest of the system needs from the metadata provider.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    /// Single-strategy title search, optionally restricted to a release year.
    async fn search(&self, query: &str, year: Option<i32>) -> Result<SearchPage, TmdbError>;

    /// Year-aware multi-strategy search with re-ranked results.
    async fn search_enhanced(&self, query: &str) -> Result<SearchPage, TmdbError> {
        enhanced::search_enhanced(self, query).await
    }

    /// Fetch one movie with credits. Upstream 404 is [`TmdbError::NotFound`].
    async fn get_movie(&self, id: i64) -> Result<MovieDetails, TmdbError>;

    /// Streaming/rental availability for one movie, keyed by region.
    async fn get_watch_providers(&self, id: i64) -> Result<WatchProviders, TmdbError>;
}

/// HTTP client for the TMDB API.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url` - API root without a trailing slash, e.g. [`DEFAULT_BASE_URL`].
    /// * `timeout` - Applied to every request end to end.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`TmdbError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TmdbError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TmdbError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search(&self, query: &str, year: Option<i32>) -> Result<SearchPage, TmdbError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TmdbError::InvalidArgument(
                "Search query must not be empty".to_string(),
            ));
        }

        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("query", query.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }

        tracing::debug!(query, ?year, "TMDB search");
        let response = self
            .client
            .get(self.url("/search/movie"))
            .query(&params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_movie(&self, id: i64) -> Result<MovieDetails, TmdbError> {
        tracing::debug!(tmdb_id = id, "TMDB movie lookup");
        let response = self
            .client
            .get(self.url(&format!("/movie/{id}")))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("append_to_response", "credits"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound { id });
        }

        let raw: RawMovieDetails = Self::parse_response(response).await?;
        Ok(raw.into())
    }

    async fn get_watch_providers(&self, id: i64) -> Result<WatchProviders, TmdbError> {
        let response = self
            .client
            .get(self.url(&format!("/movie/{id}/watch/providers")))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
