//! Chat message entity model.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub message_type: String,
    pub content: String,
    pub target_department_id: Option<DbId>,
    pub target_batch: Option<String>,
    pub target_user_id: Option<DbId>,
    pub created_at: Timestamp,
}
