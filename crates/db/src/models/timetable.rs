//! Timetable entity models and DTOs.

use campus_core::types::{DbId, TimeOfDay, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `timetable` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntry {
    pub id: DbId,
    pub department_id: DbId,
    pub batch: String,
    pub classroom_id: DbId,
    pub professor_id: DbId,
    pub subject: String,
    pub day_of_week: i16,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A timetable row joined with its department, room, and professor
/// display fields. Used by list endpoints and as the fan-out snapshot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntryDetail {
    pub id: DbId,
    pub department_id: DbId,
    pub batch: String,
    pub classroom_id: DbId,
    pub professor_id: DbId,
    pub subject: String,
    pub day_of_week: i16,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub department_name: String,
    pub department_code: String,
    pub room_no: String,
    pub room_type: String,
    pub professor_first_name: String,
    pub professor_last_name: String,
}

/// DTO for creating a timetable entry.
#[derive(Debug, Deserialize)]
pub struct CreateTimetableEntry {
    pub department_id: DbId,
    pub batch: String,
    pub classroom_id: DbId,
    pub professor_id: DbId,
    pub subject: String,
    pub day_of_week: i16,
    #[serde(with = "campus_core::timefmt")]
    pub start_time: TimeOfDay,
    #[serde(with = "campus_core::timefmt")]
    pub end_time: TimeOfDay,
}

/// DTO for a partial admin update. Unset fields keep their prior values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTimetableEntry {
    pub classroom_id: Option<DbId>,
    pub day_of_week: Option<i16>,
    #[serde(default, with = "campus_core::timefmt::option")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default, with = "campus_core::timefmt::option")]
    pub end_time: Option<TimeOfDay>,
    pub subject: Option<String>,
}

/// DTO for a professor rescheduling their own class.
#[derive(Debug, Default, Deserialize)]
pub struct RescheduleEntry {
    pub day_of_week: Option<i16>,
    #[serde(default, with = "campus_core::timefmt::option")]
    pub start_time: Option<TimeOfDay>,
    #[serde(default, with = "campus_core::timefmt::option")]
    pub end_time: Option<TimeOfDay>,
    pub classroom_id: Option<DbId>,
}

/// Final column values applied by an update, after merging with the
/// existing row. The repository writes these verbatim and refreshes
/// `updated_at`.
#[derive(Debug, Clone)]
pub struct TimetableSlotUpdate {
    pub classroom_id: DbId,
    pub day_of_week: i16,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub subject: String,
}

/// Optional filters for timetable listing.
#[derive(Debug, Default, Deserialize)]
pub struct TimetableFilter {
    pub department_id: Option<DbId>,
    pub batch: Option<String>,
    pub day_of_week: Option<i16>,
    pub professor_id: Option<DbId>,
}
