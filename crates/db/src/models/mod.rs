//! Entity models: one `FromRow` struct per table plus request DTOs.

pub mod booking;
pub mod classroom;
pub mod message;
pub mod notification;
pub mod timetable;
pub mod user;
