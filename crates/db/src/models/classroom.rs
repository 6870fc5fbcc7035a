//! Classroom entity model.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `classrooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Classroom {
    pub id: DbId,
    pub room_no: String,
    pub capacity: Option<i32>,
    pub room_type: String,
    pub created_at: Timestamp,
}
