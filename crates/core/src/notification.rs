//! Notification type tags and message templates.
//!
//! The fan-out component persists one row per recipient; the title/body
//! pairs built here are the only user-visible copy it writes.

use serde::{Deserialize, Serialize};

use crate::types::{CalendarDate, TimeOfDay};

pub const NOTIFY_TIMETABLE_CREATED: &str = "timetable_created";
pub const NOTIFY_TIMETABLE_UPDATED: &str = "timetable_updated";
pub const NOTIFY_TIMETABLE_DELETED: &str = "timetable_deleted";
pub const NOTIFY_CLASS_REMINDER: &str = "class_reminder";
pub const NOTIFY_AUDITORIUM_BOOKING: &str = "auditorium_booking";
pub const NOTIFY_NEW_MESSAGE: &str = "new_message";

/// What happened to a timetable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    /// The `notifications.notification_type` tag for this change.
    pub fn notification_type(&self) -> &'static str {
        match self {
            ChangeKind::Created => NOTIFY_TIMETABLE_CREATED,
            ChangeKind::Updated => NOTIFY_TIMETABLE_UPDATED,
            ChangeKind::Deleted => NOTIFY_TIMETABLE_DELETED,
        }
    }
}

/// A rendered notification: title + body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTemplate {
    pub title: String,
    pub body: String,
}

/// Copy for a timetable create/update/delete, addressed to affected students.
pub fn timetable_change(kind: ChangeKind, subject: &str) -> NotificationTemplate {
    match kind {
        ChangeKind::Created => NotificationTemplate {
            title: "New Class Added".to_string(),
            body: format!("New class {subject} has been added to your timetable."),
        },
        ChangeKind::Updated => NotificationTemplate {
            title: "Class Rescheduled".to_string(),
            body: format!("Class {subject} has been rescheduled."),
        },
        ChangeKind::Deleted => NotificationTemplate {
            title: "Class Removed".to_string(),
            body: format!("Class {subject} has been removed from your timetable."),
        },
    }
}

/// Copy for the 15-minute class reminder.
pub fn class_reminder(subject: &str, room_no: &str) -> NotificationTemplate {
    NotificationTemplate {
        title: "Upcoming Class".to_string(),
        body: format!("{subject} starts in 15 minutes - Room {room_no}"),
    }
}

/// Copy for a campus-wide auditorium booking announcement.
pub fn auditorium_booking(
    room_no: &str,
    event_name: &str,
    booking_date: CalendarDate,
    start: TimeOfDay,
    end: TimeOfDay,
) -> NotificationTemplate {
    NotificationTemplate {
        title: "Auditorium Booking".to_string(),
        body: format!(
            "Auditorium {room_no} booked for '{event_name}' on {booking_date} from {} to {}.",
            start.format("%H:%M:%S"),
            end.format("%H:%M:%S"),
        ),
    }
}

/// Copy for a chat message notification. Direct messages carry no scope.
pub fn new_message(sender_name: &str, scope: Option<&str>, content: &str) -> NotificationTemplate {
    let title = match scope {
        Some(scope) => format!("New {scope} message from {sender_name}"),
        None => format!("New message from {sender_name}"),
    };
    NotificationTemplate {
        title,
        body: preview(content),
    }
}

/// First 100 characters of the message content.
fn preview(content: &str) -> String {
    content.chars().take(100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn created_template() {
        let t = timetable_change(ChangeKind::Created, "Algorithms");
        assert_eq!(t.title, "New Class Added");
        assert_eq!(
            t.body,
            "New class Algorithms has been added to your timetable."
        );
    }

    #[test]
    fn updated_template() {
        let t = timetable_change(ChangeKind::Updated, "DBMS");
        assert_eq!(t.title, "Class Rescheduled");
        assert_eq!(t.body, "Class DBMS has been rescheduled.");
    }

    #[test]
    fn deleted_template() {
        let t = timetable_change(ChangeKind::Deleted, "Calculus");
        assert_eq!(t.title, "Class Removed");
        assert_eq!(t.body, "Class Calculus has been removed from your timetable.");
    }

    #[test]
    fn reminder_template() {
        let t = class_reminder("Operating Systems", "B-204");
        assert_eq!(t.title, "Upcoming Class");
        assert_eq!(t.body, "Operating Systems starts in 15 minutes - Room B-204");
    }

    #[test]
    fn auditorium_template_formats_date_and_times() {
        let t = auditorium_booking(
            "AUD-1",
            "Tech Fest",
            NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
        );
        assert_eq!(t.title, "Auditorium Booking");
        assert_eq!(
            t.body,
            "Auditorium AUD-1 booked for 'Tech Fest' on 2026-09-12 from 14:00:00 to 17:30:00."
        );
    }

    #[test]
    fn direct_message_title_omits_scope() {
        let t = new_message("Ada Lovelace", None, "hello");
        assert_eq!(t.title, "New message from Ada Lovelace");
        assert_eq!(t.body, "hello");
    }

    #[test]
    fn scoped_message_title_names_scope() {
        let t = new_message("Ada Lovelace", Some("broadcast"), "exam moved");
        assert_eq!(t.title, "New broadcast message from Ada Lovelace");
    }

    #[test]
    fn message_body_truncated_to_preview() {
        let long = "x".repeat(250);
        let t = new_message("A B", None, &long);
        assert_eq!(t.body.chars().count(), 100);
    }

    #[test]
    fn change_kinds_map_to_notification_types() {
        assert_eq!(ChangeKind::Created.notification_type(), "timetable_created");
        assert_eq!(ChangeKind::Updated.notification_type(), "timetable_updated");
        assert_eq!(ChangeKind::Deleted.notification_type(), "timetable_deleted");
    }
}
