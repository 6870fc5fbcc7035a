//! Handlers for the `/professor` resource.
//!
//! All endpoints require the professor role; each professor sees and
//! mutates only their own classes.

use axum::extract::{Path, Query, State};
use axum::Json;
use campus_core::types::DbId;
use campus_db::models::timetable::RescheduleEntry;
use campus_db::repositories::TimetableRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireProfessor;
use crate::state::AppState;

/// Query parameters for `GET /professor/my-classes`.
#[derive(Debug, Deserialize)]
pub struct MyClassesQuery {
    pub day_of_week: Option<i16>,
    /// When `true`, only classes mutated after creation are returned --
    /// the derived "this was rescheduled" view.
    pub rescheduled_only: Option<bool>,
}

/// GET /api/v1/professor/my-classes
///
/// The calling professor's weekly classes, optionally one weekday only,
/// optionally restricted to rescheduled entries.
pub async fn my_classes(
    RequireProfessor(professor): RequireProfessor,
    State(state): State<AppState>,
    Query(params): Query<MyClassesQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let classes = TimetableRepo::list_for_professor(
        &state.pool,
        professor.user_id,
        params.day_of_week,
        params.rescheduled_only.unwrap_or(false),
    )
    .await?;
    Ok(Json(serde_json::json!({ "data": classes })))
}

/// PUT /api/v1/professor/reschedule/{id}
///
/// Reschedule one of the caller's own classes. Affected students are
/// notified once the change commits.
pub async fn reschedule_class(
    RequireProfessor(professor): RequireProfessor,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
    Json(input): Json<RescheduleEntry>,
) -> AppResult<Json<serde_json::Value>> {
    let entry = state
        .engine
        .reschedule_own_entry(professor.user_id, entry_id, &input)
        .await?;
    Ok(Json(serde_json::json!({ "data": entry })))
}
