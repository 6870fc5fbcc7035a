//! Repository for the `auditorium_bookings` table.

use campus_core::slot::TimeSlot;
use campus_core::types::{CalendarDate, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::models::booking::{
    AuditoriumBooking, AuditoriumBookingDetail, CreateAuditoriumBooking,
    BOOKING_STATUS_CANCELLED, BOOKING_STATUS_CONFIRMED,
};
use crate::repositories::slot_overlap_sql;

/// Column list for `auditorium_bookings` queries.
const COLUMNS: &str = "id, classroom_id, booked_by, event_name, booking_date, \
    start_time, end_time, status, created_at";

/// Provides conflict-aware CRUD for dated auditorium bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Find a confirmed booking overlapping the candidate slot on the same
    /// auditorium and date, or `None` when the slot is free.
    pub async fn find_conflicting<'e>(
        executor: impl PgExecutor<'e>,
        classroom_id: DbId,
        booking_date: CalendarDate,
        slot: &TimeSlot,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT id FROM auditorium_bookings \
             WHERE classroom_id = $1 AND booking_date = $2 \
             AND status = $5 \
             AND {overlap}",
            overlap = slot_overlap_sql(3, 4),
        );
        sqlx::query_scalar(&query)
            .bind(classroom_id)
            .bind(booking_date)
            .bind(slot.start)
            .bind(slot.end)
            .bind(BOOKING_STATUS_CONFIRMED)
            .fetch_optional(executor)
            .await
    }

    /// Insert a confirmed booking, returning the full row.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAuditoriumBooking,
        booked_by: DbId,
    ) -> Result<AuditoriumBooking, sqlx::Error> {
        let query = format!(
            "INSERT INTO auditorium_bookings \
                (classroom_id, booked_by, event_name, booking_date, start_time, end_time) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditoriumBooking>(&query)
            .bind(input.classroom_id)
            .bind(booked_by)
            .bind(&input.event_name)
            .bind(input.booking_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_one(executor)
            .await
    }

    /// All confirmed bookings with room and booker display fields.
    pub async fn list_confirmed(
        pool: &PgPool,
    ) -> Result<Vec<AuditoriumBookingDetail>, sqlx::Error> {
        let query = format!(
            "SELECT ab.id, ab.classroom_id, ab.booked_by, ab.event_name, ab.booking_date, \
                ab.start_time, ab.end_time, ab.status, ab.created_at, \
                c.room_no, \
                u.first_name AS booked_by_first_name, u.last_name AS booked_by_last_name \
             FROM auditorium_bookings ab \
             JOIN classrooms c ON ab.classroom_id = c.id \
             JOIN users u ON ab.booked_by = u.id \
             WHERE ab.status = $1 \
             ORDER BY ab.booking_date, ab.start_time"
        );
        sqlx::query_as::<_, AuditoriumBookingDetail>(&query)
            .bind(BOOKING_STATUS_CONFIRMED)
            .fetch_all(pool)
            .await
    }

    /// Transition a confirmed booking to cancelled, freeing its slot.
    ///
    /// Returns `false` when the booking does not exist or is already
    /// cancelled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auditorium_bookings SET status = $2 WHERE id = $1 AND status = $3",
        )
        .bind(id)
        .bind(BOOKING_STATUS_CANCELLED)
        .bind(BOOKING_STATUS_CONFIRMED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
