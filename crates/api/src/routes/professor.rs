//! Route definitions for the `/professor` resource.
//!
//! All endpoints require the professor role.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::professor;
use crate::state::AppState;

/// Routes mounted at `/professor`.
///
/// ```text
/// GET /my-classes        -> my_classes
/// PUT /reschedule/{id}   -> reschedule_class
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my-classes", get(professor::my_classes))
        .route("/reschedule/{id}", put(professor::reschedule_class))
}
