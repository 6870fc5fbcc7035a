//! Room kind constants.
//!
//! Regular weekly timetable slots may only use `classroom` rooms;
//! auditoriums are booked per-date and never appear in the weekly grid.

pub const ROOM_TYPE_CLASSROOM: &str = "classroom";
pub const ROOM_TYPE_AUDITORIUM: &str = "auditorium";
