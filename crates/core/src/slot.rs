//! Half-open time-slot arithmetic.
//!
//! Every conflict decision in the scheduler reduces to [`TimeSlot::overlaps`]:
//! two slots on the same day (and, for auditoriums, the same date) conflict
//! iff their `[start, end)` intervals intersect. The SQL side mirrors this
//! predicate through a single shared fragment in the repository layer, so
//! the boundary logic exists exactly once per layer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::TimeOfDay;

/// A half-open `[start, end)` wall-clock interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "crate::timefmt")]
    pub start: TimeOfDay,
    #[serde(with = "crate::timefmt")]
    pub end: TimeOfDay,
}

impl TimeSlot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// True iff the two half-open intervals intersect.
    ///
    /// Touching endpoints are not a conflict: a class ending at 10:55 and
    /// another starting at 10:55 may share a room.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Reject inverted or empty intervals.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.start >= self.end {
            return Err(CoreError::Validation(
                "start_time must be before end_time".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate the 0–6 (Monday = 0) weekday convention.
pub fn validate_day_of_week(day_of_week: i16) -> Result<(), CoreError> {
    if !(0..=6).contains(&day_of_week) {
        return Err(CoreError::Validation(
            "day_of_week must be between 0 and 6".to_string(),
        ));
    }
    Ok(())
}
