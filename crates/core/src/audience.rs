//! Audience targeting rules.
//!
//! An [`Audience`] describes *who* receives a notification; the `db` crate
//! resolves it to concrete user ids. The same filter shape serves both the
//! scheduler's fan-outs (students of a department/batch, or every active
//! user) and chat's role-scoped broadcast rules.

use serde::Deserialize;

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_PROFESSOR, ROLE_STUDENT};
use crate::types::DbId;

/// Which roles an audience includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    /// Active students only (timetable and class-reminder notifications).
    StudentsOnly,
    /// Every active user regardless of role (auditorium bookings, broadcast).
    AllActive,
}

/// A declarative recipient filter: active users matching every set field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audience {
    pub department_id: Option<DbId>,
    pub batch: Option<String>,
    pub role: RoleFilter,
    /// Excluded from the recipient set (chat senders don't notify themselves).
    pub exclude_user: Option<DbId>,
}

impl Audience {
    /// Students of one department and batch — the timetable fan-out audience.
    pub fn students_of(department_id: DbId, batch: &str) -> Self {
        Self {
            department_id: Some(department_id),
            batch: Some(batch.to_string()),
            role: RoleFilter::StudentsOnly,
            exclude_user: None,
        }
    }

    /// Every active user — the auditorium-booking audience.
    pub fn all_active() -> Self {
        Self {
            department_id: None,
            batch: None,
            role: RoleFilter::AllActive,
            exclude_user: None,
        }
    }
}

/// Chat message scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageScope {
    Broadcast,
    Department,
    Batch,
    Direct,
}

impl MessageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageScope::Broadcast => "broadcast",
            MessageScope::Department => "department",
            MessageScope::Batch => "batch",
            MessageScope::Direct => "direct",
        }
    }
}

/// The sender attributes that drive default targeting.
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: DbId,
    pub role: String,
    pub department_id: Option<DbId>,
    pub batch: Option<String>,
}

/// Compute the audience for a non-direct chat message.
///
/// When the sender omits explicit targets, role-based defaults apply:
/// students reach only their own batch, professors their own department
/// (students only), admins anything or everyone. Explicit targets are
/// honoured only where the role may set them.
pub fn resolve_chat_audience(
    sender: &Sender,
    scope: MessageScope,
    target_department_id: Option<DbId>,
    target_batch: Option<String>,
) -> Result<Audience, CoreError> {
    let (department_id, batch) = match scope {
        MessageScope::Broadcast => match sender.role.as_str() {
            ROLE_STUDENT => {
                let dept = sender.department_id.ok_or_else(|| {
                    CoreError::Validation("Student department or batch not set".to_string())
                })?;
                let batch = sender.batch.clone().ok_or_else(|| {
                    CoreError::Validation("Student department or batch not set".to_string())
                })?;
                (Some(dept), Some(batch))
            }
            ROLE_PROFESSOR => {
                let dept = sender.department_id.ok_or_else(|| {
                    CoreError::Validation("Professor department not set".to_string())
                })?;
                (Some(dept), target_batch)
            }
            ROLE_ADMIN => (target_department_id, target_batch),
            other => {
                return Err(CoreError::Forbidden(format!(
                    "Role '{other}' may not broadcast"
                )))
            }
        },
        MessageScope::Department => {
            let dept = if sender.role == ROLE_ADMIN {
                target_department_id.ok_or_else(|| {
                    CoreError::Validation("target_department_id is required".to_string())
                })?
            } else {
                sender.department_id.ok_or_else(|| {
                    CoreError::Validation("Sender department not set".to_string())
                })?
            };
            (Some(dept), target_batch)
        }
        MessageScope::Batch => {
            if sender.role == ROLE_STUDENT {
                let dept = sender.department_id.ok_or_else(|| {
                    CoreError::Validation("Student department not set".to_string())
                })?;
                let batch = target_batch.or_else(|| sender.batch.clone()).ok_or_else(|| {
                    CoreError::Validation("Student batch not set".to_string())
                })?;
                (Some(dept), Some(batch))
            } else {
                let dept = target_department_id.or(sender.department_id);
                let batch = target_batch.ok_or_else(|| {
                    CoreError::Validation("target_batch is required".to_string())
                })?;
                (dept, Some(batch))
            }
        }
        MessageScope::Direct => {
            return Err(CoreError::Validation(
                "direct messages target a single user, not an audience".to_string(),
            ))
        }
    };

    // Professors address students; everyone else reaches all active users
    // matching the filters.
    let role = if sender.role == ROLE_PROFESSOR {
        RoleFilter::StudentsOnly
    } else {
        RoleFilter::AllActive
    };

    Ok(Audience {
        department_id,
        batch,
        role,
        exclude_user: Some(sender.id),
    })
}
