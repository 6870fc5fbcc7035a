//! Handlers for the `/auditorium` resource (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::types::DbId;
use campus_db::models::booking::CreateAuditoriumBooking;
use campus_db::repositories::BookingRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/auditorium/book
///
/// Book an auditorium for a dated event. Every active user is notified.
/// Returns 201 with the new booking.
pub async fn book_auditorium(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAuditoriumBooking>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let booking = state.engine.book_auditorium(&input, admin.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": booking })),
    ))
}

/// GET /api/v1/auditorium/bookings
///
/// All confirmed bookings in date order, with room and booker fields.
pub async fn list_bookings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let bookings = BookingRepo::list_confirmed(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": bookings })))
}

/// POST /api/v1/auditorium/bookings/{id}/cancel
///
/// Cancel a confirmed booking, freeing its slot immediately.
/// Returns 204 No Content, or 404 if the booking does not exist or is
/// already cancelled.
pub async fn cancel_booking(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.cancel_booking(booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
