//! Auditorium booking entity models and DTOs.

use campus_core::types::{CalendarDate, DbId, TimeOfDay, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const BOOKING_STATUS_CONFIRMED: &str = "confirmed";
pub const BOOKING_STATUS_CANCELLED: &str = "cancelled";

/// A row from the `auditorium_bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditoriumBooking {
    pub id: DbId,
    pub classroom_id: DbId,
    pub booked_by: DbId,
    pub event_name: String,
    pub booking_date: CalendarDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: String,
    pub created_at: Timestamp,
}

/// A booking joined with room and booker display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditoriumBookingDetail {
    pub id: DbId,
    pub classroom_id: DbId,
    pub booked_by: DbId,
    pub event_name: String,
    pub booking_date: CalendarDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: String,
    pub created_at: Timestamp,
    pub room_no: String,
    pub booked_by_first_name: String,
    pub booked_by_last_name: String,
}

/// DTO for booking an auditorium.
#[derive(Debug, Deserialize)]
pub struct CreateAuditoriumBooking {
    pub classroom_id: DbId,
    pub event_name: String,
    pub booking_date: CalendarDate,
    #[serde(with = "campus_core::timefmt")]
    pub start_time: TimeOfDay,
    #[serde(with = "campus_core::timefmt")]
    pub end_time: TimeOfDay,
}
