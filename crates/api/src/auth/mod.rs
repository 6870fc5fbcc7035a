//! Token validation for the caller-identity boundary.
//!
//! This service consumes identity: tokens are minted by the identity
//! provider, never by an endpoint here.

pub mod jwt;
