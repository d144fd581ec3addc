//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod error_log_repo;
pub mod movie_repo;
pub mod oscar_repo;
pub mod rating_repo;
pub mod tag_repo;
pub mod user_repo;
pub mod vault_movie_repo;
pub mod vault_repo;

pub use error_log_repo::ErrorLogRepo;
pub use movie_repo::MovieRepo;
pub use oscar_repo::OscarRepo;
pub use rating_repo::RatingRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
pub use vault_movie_repo::VaultMovieRepo;
pub use vault_repo::VaultRepo;

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("/api/v1/vaults"), "/api/v1/vaults");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
