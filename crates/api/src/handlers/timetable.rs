//! Handlers for the `/timetable` resource.
//!
//! Reads are open to any authenticated user; mutations are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::slot::TimeSlot;
use campus_core::types::{DbId, TimeOfDay};
use campus_db::models::timetable::{CreateTimetableEntry, TimetableFilter, UpdateTimetableEntry};
use campus_db::repositories::TimetableRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/timetable
///
/// List timetable entries with optional department/batch/day/professor
/// filters, in weekly-grid order.
pub async fn list_timetable(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TimetableFilter>,
) -> AppResult<Json<serde_json::Value>> {
    let entries = TimetableRepo::list(&state.pool, &filter).await?;
    Ok(Json(serde_json::json!({ "data": entries })))
}

/// POST /api/v1/timetable
///
/// Create a timetable entry (admin only). Returns 201 with the new entry.
pub async fn create_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTimetableEntry>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let entry = state.engine.create_entry(&input, admin.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": entry })),
    ))
}

/// PUT /api/v1/timetable/{id}
///
/// Partially update an entry (admin only). Unset fields keep their values.
pub async fn update_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
    Json(input): Json<UpdateTimetableEntry>,
) -> AppResult<Json<serde_json::Value>> {
    let entry = state.engine.update_entry(entry_id, &input).await?;
    Ok(Json(serde_json::json!({ "data": entry })))
}

/// DELETE /api/v1/timetable/{id}
///
/// Delete an entry (admin only). Affected students are notified with the
/// pre-deletion snapshot. Returns 204 No Content.
pub async fn delete_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.delete_entry(entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters for `GET /timetable/available-rooms`.
#[derive(Debug, Deserialize)]
pub struct AvailableRoomsQuery {
    pub day_of_week: i16,
    #[serde(with = "campus_core::timefmt")]
    pub start_time: TimeOfDay,
    #[serde(with = "campus_core::timefmt")]
    pub end_time: TimeOfDay,
}

/// GET /api/v1/timetable/available-rooms
///
/// Rooms with no overlapping timetable entry in the given weekday slot.
pub async fn available_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AvailableRoomsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let slot = TimeSlot::new(params.start_time, params.end_time);
    let rooms = state.engine.available_rooms(params.day_of_week, slot).await?;
    Ok(Json(serde_json::json!({ "data": rooms })))
}
