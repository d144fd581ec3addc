//! Wire types for the TMDB endpoints this crate calls.
//!
//! Every field TMDB may omit carries a serde default so a sparse upstream
//! payload still produces a complete record.

use std::collections::BTreeMap;

use reelvault_core::genre::Genre;
use serde::{Deserialize, Serialize};

/// One entry of a `/search/movie` result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    /// `YYYY-MM-DD`, or empty when TMDB does not know it.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

/// A page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_results: i64,
    #[serde(default)]
    pub total_pages: i64,
}

/// Normalized `/movie/{id}` record with the director lifted out of the
/// credits block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub runtime: Option<i32>,
    pub genres: Vec<Genre>,
    pub vote_average: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub imdb_id: Option<String>,
    pub director: Option<String>,
}

/// `/movie/{id}?append_to_response=credits` as TMDB sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawMovieDetails {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    runtime: Option<i32>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: i64,
    #[serde(default)]
    popularity: f64,
    #[serde(default)]
    imdb_id: Option<String>,
    #[serde(default)]
    credits: Credits,
}

#[derive(Debug, Default, Deserialize)]
struct Credits {
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
struct CrewMember {
    #[serde(default)]
    job: String,
    #[serde(default)]
    name: String,
}

impl From<RawMovieDetails> for MovieDetails {
    fn from(raw: RawMovieDetails) -> Self {
        let director = raw
            .credits
            .crew
            .into_iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name);

        Self {
            id: raw.id,
            title: raw.title,
            original_title: raw.original_title,
            release_date: raw.release_date.filter(|d| !d.is_empty()),
            overview: raw.overview,
            poster_path: raw.poster_path,
            backdrop_path: raw.backdrop_path,
            runtime: raw.runtime,
            genres: raw.genres,
            vote_average: raw.vote_average,
            vote_count: raw.vote_count,
            popularity: raw.popularity,
            imdb_id: raw.imdb_id.filter(|id| !id.is_empty()),
            director,
        }
    }
}

/// Collapse a details record into the search-result shape, so a direct-id
/// hit can be returned alongside text-search results.
impl From<MovieDetails> for TmdbMovie {
    fn from(details: MovieDetails) -> Self {
        Self {
            id: details.id,
            genre_ids: details.genres.iter().map(|g| g.id).collect(),
            title: details.title,
            original_title: details.original_title,
            release_date: details.release_date,
            overview: details.overview,
            poster_path: details.poster_path,
            backdrop_path: details.backdrop_path,
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            popularity: details.popularity,
        }
    }
}

/// `/movie/{id}/watch/providers` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub id: i64,
    /// Availability keyed by ISO 3166-1 region code.
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flatrate: Vec<Provider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rent: Vec<Provider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buy: Vec<Provider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free: Vec<Provider>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ads: Vec<Provider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: i64,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: i64,
}
