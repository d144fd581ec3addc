//! The search-box fallback chain: direct id first, then text search.

use serde::Serialize;

use crate::client::TmdbApi;
use crate::error::TmdbError;
use crate::id::extract_tmdb_id;
use crate::types::{SearchPage, TmdbMovie};

/// Which strategy produced a [`SearchOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    DirectId,
    Enhanced,
    Basic,
}

/// Normalized search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<TmdbMovie>,
    pub total_results: i64,
    pub total_pages: i64,
    #[serde(rename = "searchMethod")]
    pub search_method: SearchMethod,
}

impl SearchOutcome {
    fn from_page(page: SearchPage, search_method: SearchMethod) -> Self {
        Self {
            results: page.results,
            total_results: page.total_results,
            total_pages: page.total_pages,
            search_method,
        }
    }
}

/// Resolve a free-text query that may also be a TMDB id or movie URL.
///
/// A blank query fails with [`TmdbError::InvalidArgument`] before any
/// upstream call. When the query carries an id, that movie is fetched
/// first; any failure of that lookup is logged and the query falls
/// through to text search unchanged.
pub async fn search_movies<A: TmdbApi + ?Sized>(
    api: &A,
    query: &str,
    enhanced: bool,
) -> Result<SearchOutcome, TmdbError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(TmdbError::InvalidArgument(
            "Search query is required".to_string(),
        ));
    }

    if let Some(tmdb_id) = extract_tmdb_id(query) {
        match api.get_movie(tmdb_id).await {
            Ok(details) => {
                return Ok(SearchOutcome {
                    results: vec![details.into()],
                    total_results: 1,
                    total_pages: 1,
                    search_method: SearchMethod::DirectId,
                });
            }
            Err(e) => {
                tracing::warn!(tmdb_id, error = %e, "Direct id lookup failed, falling back to text search");
            }
        }
    }

    if enhanced {
        let page = api.search_enhanced(query).await?;
        Ok(SearchOutcome::from_page(page, SearchMethod::Enhanced))
    } else {
        let page = api.search(query, None).await?;
        Ok(SearchOutcome::from_page(page, SearchMethod::Basic))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::types::{MovieDetails, WatchProviders};

    /// Stub that knows exactly one movie and counts upstream calls.
    #[derive(Default)]
    struct StubTmdb {
        lookups: AtomicUsize,
        searches: AtomicUsize,
        fail_lookup_with_status: Option<u16>,
    }

    const KNOWN_ID: i64 = 27205;

    fn details(id: i64) -> MovieDetails {
        MovieDetails {
            id,
            title: "Inception".to_string(),
            original_title: None,
            release_date: Some("2010-07-15".to_string()),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            runtime: Some(148),
            genres: Vec::new(),
            vote_average: 8.4,
            vote_count: 100,
            popularity: 90.0,
            imdb_id: None,
            director: Some("Christopher Nolan".to_string()),
        }
    }

    #[async_trait]
    impl TmdbApi for StubTmdb {
        async fn search(&self, query: &str, _year: Option<i32>) -> Result<SearchPage, TmdbError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            let mut movie: TmdbMovie = details(1).into();
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
            if let Some(status) = self.fail_lookup_with_status {
                return Err(TmdbError::Api {
                    status,
                    body: "unavailable".to_string(),
                });
            }
            if id == KNOWN_ID {
                Ok(details(id))
            } else {
                Err(TmdbError::NotFound { id })
            }
        }

        async fn get_watch_providers(&self, id: i64) -> Result<WatchProviders, TmdbError> {
            Ok(WatchProviders {
                id,
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn blank_query_makes_no_upstream_call() {
        let stub = StubTmdb::default();
        let err = search_movies(&stub, " \t ", true).await.unwrap_err();
        assert_matches!(err, TmdbError::InvalidArgument(_));
        assert_eq!(stub.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(stub.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn known_id_short_circuits() {
        let stub = StubTmdb::default();
        let outcome = search_movies(&stub, "27205", true).await.unwrap();
        assert_eq!(outcome.search_method, SearchMethod::DirectId);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].id, KNOWN_ID);
        assert_eq!(stub.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn url_with_slug_resolves_directly() {
        let stub = StubTmdb::default();
        let outcome = search_movies(
            &stub,
            "https://www.themoviedb.org/movie/27205-inception",
            false,
        )
        .await
        .unwrap();
        assert_eq!(outcome.search_method, SearchMethod::DirectId);
    }

    #[tokio::test]
    async fn unknown_id_falls_back_to_text_search_of_same_string() {
        let stub = StubTmdb::default();
        let outcome = search_movies(&stub, "999999", false).await.unwrap();
        assert_eq!(outcome.search_method, SearchMethod::Basic);
        assert_eq!(outcome.results[0].title, "999999");
        assert_eq!(stub.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(stub.searches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_outage_on_lookup_also_falls_back() {
        let stub = StubTmdb {
            fail_lookup_with_status: Some(503),
            ..Default::default()
        };
        let outcome = search_movies(&stub, "27205", true).await.unwrap();
        assert_eq!(outcome.search_method, SearchMethod::Enhanced);
    }

    #[tokio::test]
    async fn title_query_skips_lookup() {
        let stub = StubTmdb::default();
        let outcome = search_movies(&stub, "Inception", true).await.unwrap();
        assert_eq!(outcome.search_method, SearchMethod::Enhanced);
        assert_eq!(stub.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enhanced_with_year_runs_two_searches() {
        let stub = StubTmdb::default();
        search_movies(&stub, "Heat 1995", true).await.unwrap();
        assert_eq!(stub.searches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn search_method_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SearchMethod::DirectId).unwrap(),
            serde_json::json!("direct_id")
        );
    }
}
