use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The classroom is already occupied in the requested slot.
    #[error("Room conflict: {0}")]
    RoomConflict(String),

    /// The professor is already committed in the requested slot.
    #[error("Professor conflict: {0}")]
    ProfessorConflict(String),

    /// Slot conflict on a resource with a single axis (auditorium bookings).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
