//! Well-known role name constants.
//!
//! These must match the `users.role` check constraint in
//! `20260305000002_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PROFESSOR: &str = "professor";
pub const ROLE_STUDENT: &str = "student";
