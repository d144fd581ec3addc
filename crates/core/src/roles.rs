//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

/// Check whether a role name is assignable.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}
