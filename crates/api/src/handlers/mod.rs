//! HTTP request handlers, one module per resource.

pub mod auditorium;
pub mod chat;
pub mod notification;
pub mod professor;
pub mod timetable;
