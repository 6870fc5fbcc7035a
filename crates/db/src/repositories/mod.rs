//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that participate in the engine's check-then-write transactions
//! accept `impl PgExecutor` so they run against either the pool or an
//! open transaction.

pub mod booking_repo;
pub mod classroom_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod reminder_log_repo;
pub mod timetable_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use classroom_repo::ClassroomRepo;
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use reminder_log_repo::ReminderLogRepo;
pub use timetable_repo::{ConflictAxis, TimetableRepo};
pub use user_repo::UserRepo;

/// Render the half-open `[start, end)` overlap predicate against a row's
/// `start_time`/`end_time` columns, with the candidate slot bound at the
/// given placeholder positions (`start_bind` = candidate start,
/// `end_bind` = candidate end).
///
/// This is the single SQL rendering of the overlap rule; every conflict
/// query (room axis, professor axis, auditorium axis, available rooms)
/// embeds it rather than restating the boundary logic.
pub(crate) fn slot_overlap_sql(start_bind: usize, end_bind: usize) -> String {
    format!("(start_time < ${end_bind} AND end_time > ${start_bind})")
}
