//! Route definitions for the `/chat` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST /messages -> send_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", post(chat::send_message))
}
