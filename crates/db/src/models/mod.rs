//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the table allows it

pub mod error_log;
pub mod movie;
pub mod oscar;
pub mod rating;
pub mod tag;
pub mod user;
pub mod vault;
pub mod vault_movie;
