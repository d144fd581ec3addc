//! Request extractors and middleware layers.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from an identity token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`error_reporter::report_errors`] -- Persists error responses to `error_logs`.

pub mod auth;
pub mod error_reporter;
pub mod rbac;
