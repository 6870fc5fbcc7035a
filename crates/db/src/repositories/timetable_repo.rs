//! Repository for the `timetable` table.

use campus_core::slot::TimeSlot;
use campus_core::types::{DbId, TimeOfDay};
use sqlx::{PgExecutor, PgPool};

use crate::models::timetable::{
    CreateTimetableEntry, TimetableEntry, TimetableEntryDetail, TimetableFilter,
    TimetableSlotUpdate,
};
use crate::repositories::slot_overlap_sql;

/// Column list for `timetable` queries.
const COLUMNS: &str = "id, department_id, batch, classroom_id, professor_id, subject, \
    day_of_week, start_time, end_time, created_by, created_at, updated_at";

/// Joined column list for detail queries (aliased to the detail model).
const DETAIL_COLUMNS: &str = "t.id, t.department_id, t.batch, t.classroom_id, t.professor_id, \
    t.subject, t.day_of_week, t.start_time, t.end_time, t.created_by, t.created_at, t.updated_at, \
    d.name AS department_name, d.code AS department_code, \
    c.room_no, c.room_type, \
    u.first_name AS professor_first_name, u.last_name AS professor_last_name";

const DETAIL_JOINS: &str = "FROM timetable t \
    JOIN departments d ON t.department_id = d.id \
    JOIN classrooms c ON t.classroom_id = c.id \
    JOIN users u ON t.professor_id = u.id";

/// The resource dimension along which slot overlap is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAxis {
    Room,
    Professor,
}

impl ConflictAxis {
    fn column(&self) -> &'static str {
        match self {
            ConflictAxis::Room => "classroom_id",
            ConflictAxis::Professor => "professor_id",
        }
    }
}

/// Provides CRUD and conflict queries for weekly timetable entries.
pub struct TimetableRepo;

impl TimetableRepo {
    /// Find one entry whose slot overlaps the candidate on the given axis,
    /// or `None` when the slot is free.
    ///
    /// `exclude_id` removes an entry from consideration so updates and
    /// reschedules never conflict with themselves.
    pub async fn find_conflicting<'e>(
        executor: impl PgExecutor<'e>,
        axis: ConflictAxis,
        resource_id: DbId,
        day_of_week: i16,
        slot: &TimeSlot,
        exclude_id: Option<DbId>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT id FROM timetable \
             WHERE {column} = $1 AND day_of_week = $2 \
             AND {overlap} \
             AND ($5::bigint IS NULL OR id <> $5)",
            column = axis.column(),
            overlap = slot_overlap_sql(3, 4),
        );
        sqlx::query_scalar(&query)
            .bind(resource_id)
            .bind(day_of_week)
            .bind(slot.start)
            .bind(slot.end)
            .bind(exclude_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a new entry, returning the full row.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTimetableEntry,
        created_by: DbId,
    ) -> Result<TimetableEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO timetable \
                (department_id, batch, classroom_id, professor_id, subject, day_of_week, \
                 start_time, end_time, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(input.department_id)
            .bind(&input.batch)
            .bind(input.classroom_id)
            .bind(input.professor_id)
            .bind(&input.subject)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// Fetch an entry by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timetable WHERE id = $1");
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch an entry with department/room/professor display fields.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TimetableEntryDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} WHERE t.id = $1");
        sqlx::query_as::<_, TimetableEntryDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List entries matching the given filters, in weekly-grid order.
    pub async fn list(
        pool: &PgPool,
        filter: &TimetableFilter,
    ) -> Result<Vec<TimetableEntryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} \
             WHERE ($1::bigint IS NULL OR t.department_id = $1) \
             AND ($2::text IS NULL OR t.batch = $2) \
             AND ($3::smallint IS NULL OR t.day_of_week = $3) \
             AND ($4::bigint IS NULL OR t.professor_id = $4) \
             ORDER BY t.day_of_week, t.start_time"
        );
        sqlx::query_as::<_, TimetableEntryDetail>(&query)
            .bind(filter.department_id)
            .bind(&filter.batch)
            .bind(filter.day_of_week)
            .bind(filter.professor_id)
            .fetch_all(pool)
            .await
    }

    /// List a professor's entries, optionally one weekday only, optionally
    /// restricted to rescheduled entries (`updated_at > created_at`).
    pub async fn list_for_professor(
        pool: &PgPool,
        professor_id: DbId,
        day_of_week: Option<i16>,
        rescheduled_only: bool,
    ) -> Result<Vec<TimetableEntryDetail>, sqlx::Error> {
        let rescheduled_filter = if rescheduled_only {
            "AND t.updated_at > t.created_at"
        } else {
            ""
        };
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} \
             WHERE t.professor_id = $1 \
             AND ($2::smallint IS NULL OR t.day_of_week = $2) \
             {rescheduled_filter} \
             ORDER BY t.day_of_week, t.start_time"
        );
        sqlx::query_as::<_, TimetableEntryDetail>(&query)
            .bind(professor_id)
            .bind(day_of_week)
            .fetch_all(pool)
            .await
    }

    /// Apply merged slot values to an entry and refresh `updated_at`.
    ///
    /// Returns `None` when no row with the given id exists.
    pub async fn apply_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        update: &TimetableSlotUpdate,
    ) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE timetable SET \
                classroom_id = $2, \
                day_of_week = $3, \
                start_time = $4, \
                end_time = $5, \
                subject = $6, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .bind(update.classroom_id)
            .bind(update.day_of_week)
            .bind(update.start_time)
            .bind(update.end_time)
            .bind(&update.subject)
            .fetch_optional(executor)
            .await
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timetable WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Entries on `day_of_week` starting within `[from, to)`.
    ///
    /// Drives the class-reminder job's 15-minute lookahead window.
    pub async fn starting_between(
        pool: &PgPool,
        day_of_week: i16,
        from: TimeOfDay,
        to: TimeOfDay,
    ) -> Result<Vec<TimetableEntryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_JOINS} \
             WHERE t.day_of_week = $1 AND t.start_time >= $2 AND t.start_time < $3 \
             ORDER BY t.start_time"
        );
        sqlx::query_as::<_, TimetableEntryDetail>(&query)
            .bind(day_of_week)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
