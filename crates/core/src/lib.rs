//! Domain types and rules shared by every ReelVault crate.
//!
//! This crate performs no I/O. The database, TMDB client, and HTTP layers
//! all depend on it for the error taxonomy, id/timestamp aliases, and the
//! small validation helpers that must agree across layers.

pub mod error;
pub mod genre;
pub mod pagination;
pub mod rating;
pub mod release_date;
pub mod roles;
pub mod tags;
pub mod types;
pub mod validation;
