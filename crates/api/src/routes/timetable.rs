//! Route definitions for the `/timetable` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::timetable;
use crate::state::AppState;

/// Routes mounted at `/timetable`.
///
/// ```text
/// GET    /                  -> list_timetable (auth)
/// POST   /                  -> create_entry (admin)
/// GET    /available-rooms   -> available_rooms (auth)
/// PUT    /{id}              -> update_entry (admin)
/// DELETE /{id}              -> delete_entry (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(timetable::list_timetable).post(timetable::create_entry),
        )
        .route("/available-rooms", get(timetable::available_rooms))
        .route(
            "/{id}",
            axum::routing::put(timetable::update_entry).delete(timetable::delete_entry),
        )
}
