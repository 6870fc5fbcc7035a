//! Domain logic shared by the campus scheduling backend.
//!
//! This crate has zero internal deps so it can be used by both the
//! API/repository layer and any future worker or CLI tooling.

pub mod audience;
pub mod error;
pub mod notification;
pub mod roles;
pub mod rooms;
pub mod slot;
pub mod timefmt;
pub mod types;
