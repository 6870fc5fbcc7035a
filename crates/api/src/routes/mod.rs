pub mod auditorium;
pub mod chat;
pub mod health;
pub mod notification;
pub mod professor;
pub mod timetable;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (token-authenticated push)
///
/// /timetable                           list (auth), create (admin)
/// /timetable/{id}                      update, delete (admin)
/// /timetable/available-rooms           free rooms for a weekday slot (auth)
///
/// /professor/my-classes                own classes, rescheduled filter
/// /professor/reschedule/{id}           reschedule own class
///
/// /auditorium/book                     book an auditorium (admin)
/// /auditorium/bookings                 confirmed bookings (admin)
/// /auditorium/bookings/{id}/cancel     cancel a booking (admin)
///
/// /notifications                       inbox listing (auth)
/// /notifications/{id}/read             mark read
/// /notifications/read-all              mark all read
/// /notifications/unread-count          unread badge count
///
/// /chat/messages                       send a message (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/timetable", timetable::router())
        .nest("/professor", professor::router())
        .nest("/auditorium", auditorium::router())
        .nest("/notifications", notification::router())
        .nest("/chat", chat::router())
}
