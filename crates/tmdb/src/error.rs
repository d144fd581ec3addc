/// Errors from the TMDB client layer.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("TMDB request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDB answered 404 for a movie lookup.
    #[error("TMDB movie {id} not found")]
    NotFound { id: i64 },

    /// TMDB returned any other non-2xx status code.
    #[error("TMDB API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The caller supplied an argument that cannot be sent upstream.
    #[error("{0}")]
    InvalidArgument(String),
}
