//! Conflict-checked scheduling operations.
//!
//! Every mutation follows the same shape: validate locally, run the
//! conflict queries and the write inside one transaction, commit, then
//! fan out notifications from the committed snapshot. The store's
//! exclusion constraints back the transactional pre-check, so a losing
//! racer fails at commit with the same conflict response.

use std::sync::Arc;

use campus_core::error::CoreError;
use campus_core::notification::ChangeKind;
use campus_core::rooms::{ROOM_TYPE_AUDITORIUM, ROOM_TYPE_CLASSROOM};
use campus_core::slot::{validate_day_of_week, TimeSlot};
use campus_core::types::DbId;
use campus_db::models::booking::{AuditoriumBooking, CreateAuditoriumBooking};
use campus_db::models::classroom::Classroom;
use campus_db::models::timetable::{
    CreateTimetableEntry, RescheduleEntry, TimetableEntry, TimetableSlotUpdate,
    UpdateTimetableEntry,
};
use campus_db::repositories::{BookingRepo, ClassroomRepo, ConflictAxis, TimetableRepo};
use campus_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::notifications::NotificationFanout;

/// The scheduling engine: conflict-aware mutations over the weekly
/// timetable and dated auditorium bookings.
pub struct SchedulingEngine {
    pool: DbPool,
    fanout: Arc<NotificationFanout>,
}

impl SchedulingEngine {
    /// Create a new engine over the given pool and fan-out.
    pub fn new(pool: DbPool, fanout: Arc<NotificationFanout>) -> Self {
        Self { pool, fanout }
    }

    // ── Timetable entries ────────────────────────────────────────────

    /// Create a weekly timetable entry.
    ///
    /// Rejects blank fields, an out-of-range weekday, an inverted interval,
    /// a non-classroom room, and any overlap on the room or professor axis.
    pub async fn create_entry(
        &self,
        input: &CreateTimetableEntry,
        created_by: DbId,
    ) -> AppResult<TimetableEntry> {
        require_non_blank("batch", &input.batch)?;
        require_non_blank("subject", &input.subject)?;
        validate_day_of_week(input.day_of_week)?;
        let slot = TimeSlot::new(input.start_time, input.end_time);
        slot.validate()?;

        let room = self.require_room(input.classroom_id).await?;
        if room.room_type != ROOM_TYPE_CLASSROOM {
            return Err(CoreError::Validation(
                "classroom_id must reference a room of type 'classroom'".to_string(),
            )
            .into());
        }

        let mut tx = self.pool.begin().await?;

        self.check_both_axes(
            &mut tx,
            input.classroom_id,
            input.professor_id,
            input.day_of_week,
            &slot,
            None,
        )
        .await?;

        let entry = TimetableRepo::insert(&mut *tx, input, created_by).await?;
        tx.commit().await?;

        tracing::info!(
            entry_id = entry.id,
            classroom_id = entry.classroom_id,
            professor_id = entry.professor_id,
            day_of_week = entry.day_of_week,
            "Timetable entry created"
        );

        self.fan_out_change(entry.id, ChangeKind::Created).await;
        Ok(entry)
    }

    /// Partially update an entry (admin path).
    ///
    /// Unset fields keep their prior values. Conflict checks re-run
    /// whenever the room, weekday, or times change.
    pub async fn update_entry(
        &self,
        entry_id: DbId,
        input: &UpdateTimetableEntry,
    ) -> AppResult<TimetableEntry> {
        let existing = self.require_entry(entry_id).await?;

        if input.classroom_id.is_none()
            && input.day_of_week.is_none()
            && input.start_time.is_none()
            && input.end_time.is_none()
            && input.subject.is_none()
        {
            return Err(CoreError::Validation("No fields to update".to_string()).into());
        }

        let update = TimetableSlotUpdate {
            classroom_id: input.classroom_id.unwrap_or(existing.classroom_id),
            day_of_week: input.day_of_week.unwrap_or(existing.day_of_week),
            start_time: input.start_time.unwrap_or(existing.start_time),
            end_time: input.end_time.unwrap_or(existing.end_time),
            subject: input
                .subject
                .clone()
                .unwrap_or_else(|| existing.subject.clone()),
        };
        require_non_blank("subject", &update.subject)?;

        if update.classroom_id != existing.classroom_id {
            let room = self.require_room(update.classroom_id).await?;
            if room.room_type != ROOM_TYPE_CLASSROOM {
                return Err(CoreError::Validation(
                    "classroom_id must reference a room of type 'classroom'".to_string(),
                )
                .into());
            }
        }

        self.apply_slot_update(&existing, &update, existing.professor_id)
            .await
    }

    /// Reschedule an entry on behalf of the professor who owns it.
    ///
    /// Ownership failures surface as NotFound so the endpoint does not leak
    /// which entries exist. The professor axis is keyed by the caller, so a
    /// professor cannot schedule around themselves.
    pub async fn reschedule_own_entry(
        &self,
        caller_id: DbId,
        entry_id: DbId,
        input: &RescheduleEntry,
    ) -> AppResult<TimetableEntry> {
        let existing = self.require_entry(entry_id).await?;
        if existing.professor_id != caller_id {
            return Err(CoreError::NotFound {
                entity: "TimetableEntry",
                id: entry_id,
            }
            .into());
        }

        let update = TimetableSlotUpdate {
            classroom_id: input.classroom_id.unwrap_or(existing.classroom_id),
            day_of_week: input.day_of_week.unwrap_or(existing.day_of_week),
            start_time: input.start_time.unwrap_or(existing.start_time),
            end_time: input.end_time.unwrap_or(existing.end_time),
            subject: existing.subject.clone(),
        };

        // Auditoriums are never valid reschedule targets.
        let room = self.require_room(update.classroom_id).await?;
        if room.room_type != ROOM_TYPE_CLASSROOM {
            return Err(CoreError::Validation(
                "Only classrooms can be selected for reschedule".to_string(),
            )
            .into());
        }

        self.apply_slot_update(&existing, &update, caller_id).await
    }

    /// Delete an entry, notifying affected students with the pre-deletion
    /// snapshot.
    pub async fn delete_entry(&self, entry_id: DbId) -> AppResult<()> {
        // Capture the snapshot before the row disappears; the fan-out body
        // names the subject being removed.
        let snapshot = TimetableRepo::find_detail(&self.pool, entry_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "TimetableEntry",
                id: entry_id,
            })?;

        let deleted = TimetableRepo::delete(&self.pool, entry_id).await?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "TimetableEntry",
                id: entry_id,
            }
            .into());
        }

        tracing::info!(entry_id, "Timetable entry deleted");

        self.fanout
            .notify_timetable_change(&snapshot, ChangeKind::Deleted)
            .await;
        Ok(())
    }

    /// Classrooms free for the whole of the given weekday slot.
    pub async fn available_rooms(
        &self,
        day_of_week: i16,
        slot: TimeSlot,
    ) -> AppResult<Vec<Classroom>> {
        validate_day_of_week(day_of_week)?;
        slot.validate()?;
        Ok(ClassroomRepo::available_rooms(&self.pool, day_of_week, &slot).await?)
    }

    // ── Auditorium bookings ──────────────────────────────────────────

    /// Book an auditorium for a dated event and announce it campus-wide.
    pub async fn book_auditorium(
        &self,
        input: &CreateAuditoriumBooking,
        booked_by: DbId,
    ) -> AppResult<AuditoriumBooking> {
        require_non_blank("event_name", &input.event_name)?;
        let slot = TimeSlot::new(input.start_time, input.end_time);
        slot.validate()?;

        let room = self.require_room(input.classroom_id).await?;
        if room.room_type != ROOM_TYPE_AUDITORIUM {
            return Err(CoreError::Validation(
                "Classroom not found or not an auditorium".to_string(),
            )
            .into());
        }

        let mut tx = self.pool.begin().await?;

        if BookingRepo::find_conflicting(&mut *tx, input.classroom_id, input.booking_date, &slot)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict("Time slot already booked".to_string()).into());
        }

        let booking = BookingRepo::insert(&mut *tx, input, booked_by).await?;
        tx.commit().await?;

        tracing::info!(
            booking_id = booking.id,
            classroom_id = booking.classroom_id,
            booking_date = %booking.booking_date,
            "Auditorium booked"
        );

        self.fanout
            .notify_auditorium_booking(&room.room_no, &booking)
            .await;
        Ok(booking)
    }

    /// Cancel a confirmed booking, freeing its slot immediately.
    pub async fn cancel_booking(&self, booking_id: DbId) -> AppResult<()> {
        let cancelled = BookingRepo::cancel(&self.pool, booking_id).await?;
        if !cancelled {
            return Err(CoreError::NotFound {
                entity: "AuditoriumBooking",
                id: booking_id,
            }
            .into());
        }
        tracing::info!(booking_id, "Auditorium booking cancelled");
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Validate, conflict-check (excluding the entry itself), and commit a
    /// slot update, then fan out the `updated` notification.
    async fn apply_slot_update(
        &self,
        existing: &TimetableEntry,
        update: &TimetableSlotUpdate,
        professor_axis_id: DbId,
    ) -> AppResult<TimetableEntry> {
        validate_day_of_week(update.day_of_week)?;
        let slot = TimeSlot::new(update.start_time, update.end_time);
        slot.validate()?;

        let slot_changed = update.classroom_id != existing.classroom_id
            || update.day_of_week != existing.day_of_week
            || update.start_time != existing.start_time
            || update.end_time != existing.end_time;

        let mut tx = self.pool.begin().await?;

        if slot_changed {
            self.check_both_axes(
                &mut tx,
                update.classroom_id,
                professor_axis_id,
                update.day_of_week,
                &slot,
                Some(existing.id),
            )
            .await?;
        }

        let entry = TimetableRepo::apply_update(&mut *tx, existing.id, update)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "TimetableEntry",
                id: existing.id,
            })?;
        tx.commit().await?;

        tracing::info!(entry_id = entry.id, "Timetable entry updated");

        self.fan_out_change(entry.id, ChangeKind::Updated).await;
        Ok(entry)
    }

    /// Run the room and professor conflict queries against one executor.
    async fn check_both_axes(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        classroom_id: DbId,
        professor_id: DbId,
        day_of_week: i16,
        slot: &TimeSlot,
        exclude_id: Option<DbId>,
    ) -> AppResult<()> {
        if TimetableRepo::find_conflicting(
            &mut **tx,
            ConflictAxis::Room,
            classroom_id,
            day_of_week,
            slot,
            exclude_id,
        )
        .await?
        .is_some()
        {
            return Err(CoreError::RoomConflict(
                "Room is already booked for this time slot".to_string(),
            )
            .into());
        }

        if TimetableRepo::find_conflicting(
            &mut **tx,
            ConflictAxis::Professor,
            professor_id,
            day_of_week,
            slot,
            exclude_id,
        )
        .await?
        .is_some()
        {
            return Err(CoreError::ProfessorConflict(
                "Professor is already assigned to another class at this time".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Fetch the committed snapshot and fan out a timetable change.
    ///
    /// The mutation has already committed; a fan-out failure here is logged
    /// inside the fan-out and never surfaced to the caller.
    async fn fan_out_change(&self, entry_id: DbId, kind: ChangeKind) {
        match TimetableRepo::find_detail(&self.pool, entry_id).await {
            Ok(Some(detail)) => {
                self.fanout.notify_timetable_change(&detail, kind).await;
            }
            Ok(None) => {
                tracing::warn!(entry_id, "Entry vanished before fan-out");
            }
            Err(e) => {
                tracing::error!(error = %e, entry_id, "Failed to load fan-out snapshot");
            }
        }
    }

    async fn require_entry(&self, entry_id: DbId) -> AppResult<TimetableEntry> {
        TimetableRepo::find_by_id(&self.pool, entry_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "TimetableEntry",
                    id: entry_id,
                }
                .into()
            })
    }

    async fn require_room(&self, classroom_id: DbId) -> AppResult<Classroom> {
        ClassroomRepo::find_by_id(&self.pool, classroom_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Classroom",
                    id: classroom_id,
                }
                .into()
            })
    }
}

/// Reject missing or whitespace-only string fields, naming the field.
fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")).into());
    }
    Ok(())
}
