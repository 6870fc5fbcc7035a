//! Repository for the `users` table.

use campus_core::audience::{Audience, RoleFilter};
use campus_core::roles::ROLE_STUDENT;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str =
    "id, email, first_name, last_name, role, department_id, batch, is_active, created_at";

/// Provides user lookups and audience resolution.
pub struct UserRepo;

impl UserRepo {
    /// Fetch a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an [`Audience`] to the ids of all matching active users.
    ///
    /// Every filter is optional; unset filters widen the audience. The
    /// result is a set: each matching user appears exactly once.
    pub async fn resolve_audience(
        pool: &PgPool,
        audience: &Audience,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let role: Option<&str> = match audience.role {
            RoleFilter::StudentsOnly => Some(ROLE_STUDENT),
            RoleFilter::AllActive => None,
        };
        sqlx::query_scalar(
            "SELECT id FROM users \
             WHERE is_active = true \
             AND ($1::bigint IS NULL OR department_id = $1) \
             AND ($2::text IS NULL OR batch = $2) \
             AND ($3::text IS NULL OR role = $3) \
             AND ($4::bigint IS NULL OR id <> $4) \
             ORDER BY id",
        )
        .bind(audience.department_id)
        .bind(&audience.batch)
        .bind(role)
        .bind(audience.exclude_user)
        .fetch_all(pool)
        .await
    }
}
