//! Year-aware search with title-match re-ranking.
//!
//! A query such as `"Heat 1995"` runs the plain search for the whole
//! string and a second search for `"Heat"` restricted to 1995. Both pages
//! are merged by id and re-ranked so exact title matches lead. A title
//! that really ends in a number, such as `"Blade Runner 2049"`, still
//! ranks first when it matches the whole query.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::client::TmdbApi;
use crate::error::TmdbError;
use crate::types::{SearchPage, TmdbMovie};

/// Earliest year treated as a release year rather than part of a title.
pub const MIN_RELEASE_YEAR: i32 = 1870;
/// Latest year treated as a release year rather than part of a title.
pub const MAX_RELEASE_YEAR: i32 = 2100;

static TRAILING_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\S)\s+[(\[]?(\d{4})[)\]]?$").expect("valid regex"));

/// Split `"Title 1999"` or `"Title (1999)"` into the title and the year.
pub fn split_trailing_year(query: &str) -> Option<(&str, i32)> {
    let caps = TRAILING_YEAR_RE.captures(query.trim())?;
    let year: i32 = caps.get(2)?.as_str().parse().ok()?;
    if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
        return None;
    }
    Some((caps.get(1)?.as_str(), year))
}

/// Run the enhanced search strategy against any [`TmdbApi`].
///
/// The two upstream calls are sequential; either failing fails the search.
pub async fn search_enhanced<A: TmdbApi + ?Sized>(
    api: &A,
    query: &str,
) -> Result<SearchPage, TmdbError> {
    let query = query.trim();
    let basic = api.search(query, None).await?;

    match split_trailing_year(query) {
        Some((title, year)) => {
            let by_year = api.search(title, Some(year)).await?;
            Ok(merge_pages(by_year, basic, query))
        }
        None => {
            let mut page = basic;
            rerank(&mut page.results, query);
            Ok(page)
        }
    }
}

/// Merge two pages, keeping the first occurrence of each id, and re-rank
/// the result against `query`.
///
/// Totals are the larger of the two, since the merged set never exceeds
/// what either search could page through on its own.
pub fn merge_pages(primary: SearchPage, secondary: SearchPage, query: &str) -> SearchPage {
    let mut seen = HashSet::new();
    let mut results: Vec<TmdbMovie> = primary
        .results
        .into_iter()
        .chain(secondary.results)
        .filter(|movie| seen.insert(movie.id))
        .collect();
    rerank(&mut results, query);

    SearchPage {
        page: primary.page.max(secondary.page),
        results,
        total_results: primary.total_results.max(secondary.total_results),
        total_pages: primary.total_pages.max(secondary.total_pages),
    }
}

/// Stable sort by how well each title matches `query`, then popularity.
///
/// From best to worst: the whole query, the query minus a trailing year,
/// a prefix of the whole query, a prefix of the stripped title.
pub fn rerank(results: &mut [TmdbMovie], query: &str) {
    let query = query.trim();
    let full = query.to_lowercase();
    let stripped = split_trailing_year(query).map(|(title, _)| title.to_lowercase());
    let needles = TitleNeedles {
        full: &full,
        stripped: stripped.as_deref(),
    };
    results.sort_by(|a, b| {
        needles
            .rank(a)
            .cmp(&needles.rank(b))
            .then_with(|| b.popularity.total_cmp(&a.popularity))
    });
}

struct TitleNeedles<'a> {
    full: &'a str,
    stripped: Option<&'a str>,
}

impl TitleNeedles<'_> {
    fn rank(&self, movie: &TmdbMovie) -> u8 {
        let title = movie.title.to_lowercase();
        if title == self.full {
            0
        } else if self.stripped == Some(title.as_str()) {
            1
        } else if title.starts_with(self.full) {
            2
        } else if self.stripped.is_some_and(|s| title.starts_with(s)) {
            3
        } else {
            4
        }
    }
}
