//! Repository for the `class_reminders_sent` dedup log.

use campus_core::types::{CalendarDate, DbId};
use sqlx::PgPool;

/// Tracks which (entry, date) reminders have already fired.
pub struct ReminderLogRepo;

impl ReminderLogRepo {
    /// Claim the reminder for an entry on a given date.
    ///
    /// Returns `true` exactly once per (entry, date): the first caller wins
    /// the insert, later callers (overlapping poll windows, restarts) see
    /// `false` and must skip the fan-out.
    pub async fn try_claim(
        pool: &PgPool,
        timetable_id: DbId,
        reminder_date: CalendarDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO class_reminders_sent (timetable_id, reminder_date) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(timetable_id)
        .bind(reminder_date)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
