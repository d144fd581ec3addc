//! Recognize a TMDB movie id pasted into the search box.

use std::sync::LazyLock;

use regex::Regex;

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// `/movie/<digits>` optionally followed by a `-slug`, ending the segment.
static MOVIE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/movie/(\d+)(?:-[^/?#\s]*)?(?:[/?#]|$)").expect("valid regex")
});

/// Extract a TMDB movie id from a bare number or a movie page URL.
///
/// Returns `None` for anything else, including zero and values that do
/// not fit an `i64`.
pub fn extract_tmdb_id(query: &str) -> Option<i64> {
    let query = query.trim();

    let digits = if BARE_ID_RE.is_match(query) {
        query
    } else {
        MOVIE_PATH_RE.captures(query)?.get(1)?.as_str()
    };

    digits.parse::<i64>().ok().filter(|id| *id > 0)
}
