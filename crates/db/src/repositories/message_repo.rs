//! Repository for the `messages` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::Message;

/// Column list for `messages` queries.
const COLUMNS: &str = "id, sender_id, message_type, content, target_department_id, \
    target_batch, target_user_id, created_at";

/// Provides persistence for chat messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message, returning the full row.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        sender_id: DbId,
        message_type: &str,
        content: &str,
        target_department_id: Option<DbId>,
        target_batch: Option<&str>,
        target_user_id: Option<DbId>,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages \
                (sender_id, message_type, content, target_department_id, target_batch, target_user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(sender_id)
            .bind(message_type)
            .bind(content)
            .bind(target_department_id)
            .bind(target_batch)
            .bind(target_user_id)
            .fetch_one(pool)
            .await
    }
}
