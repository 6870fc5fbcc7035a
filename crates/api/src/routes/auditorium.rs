//! Route definitions for the `/auditorium` resource (admin only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auditorium;
use crate::state::AppState;

/// Routes mounted at `/auditorium`.
///
/// ```text
/// POST /book                    -> book_auditorium
/// GET  /bookings                -> list_bookings
/// POST /bookings/{id}/cancel    -> cancel_booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/book", post(auditorium::book_auditorium))
        .route("/bookings", get(auditorium::list_bookings))
        .route("/bookings/{id}/cancel", post(auditorium::cancel_booking))
}
