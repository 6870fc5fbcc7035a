//! Repository for the `classrooms` table.

use campus_core::slot::TimeSlot;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::classroom::Classroom;
use crate::repositories::slot_overlap_sql;

/// Column list for `classrooms` queries.
const COLUMNS: &str = "id, room_no, capacity, room_type, created_at";

/// Provides lookups over rooms (classrooms and auditoriums).
pub struct ClassroomRepo;

impl ClassroomRepo {
    /// Fetch a room by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Classroom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classrooms WHERE id = $1");
        sqlx::query_as::<_, Classroom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rooms with no timetable entry overlapping the given weekday slot.
    ///
    /// Only the weekly grid is consulted; dated auditorium bookings live in
    /// a disjoint resource pool.
    pub async fn available_rooms(
        pool: &PgPool,
        day_of_week: i16,
        slot: &TimeSlot,
    ) -> Result<Vec<Classroom>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM classrooms \
             WHERE id NOT IN (\
                SELECT classroom_id FROM timetable \
                WHERE day_of_week = $1 AND {overlap}\
             ) \
             ORDER BY room_no",
            overlap = slot_overlap_sql(2, 3),
        );
        sqlx::query_as::<_, Classroom>(&query)
            .bind(day_of_week)
            .bind(slot.start)
            .bind(slot.end)
            .fetch_all(pool)
            .await
    }
}
