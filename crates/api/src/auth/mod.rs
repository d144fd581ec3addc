//! Identity-token verification.
//!
//! Credentials are issued by an external identity provider; this crate
//! only verifies them.

pub mod identity;
