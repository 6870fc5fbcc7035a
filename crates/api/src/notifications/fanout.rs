//! Event-to-notification fan-out.
//!
//! Called by the scheduling engine after a mutation commits, and by the chat
//! send path. Persistence of the notification rows is the durable contract;
//! the WebSocket push is a latency optimization whose failures are ignored.

use std::sync::Arc;

use axum::extract::ws::Message;
use campus_core::audience::Audience;
use campus_core::notification::{self, ChangeKind, NotificationTemplate};
use campus_core::types::DbId;
use campus_db::models::booking::AuditoriumBooking;
use campus_db::models::timetable::TimetableEntryDetail;
use campus_db::repositories::{NotificationRepo, UserRepo};
use campus_db::DbPool;

use crate::ws::WsManager;

/// Fans one accepted mutation out to every affected recipient.
///
/// The WebSocket manager is an optional dependency: constrained deployments
/// run without a push channel and rely on inbox polling alone.
pub struct NotificationFanout {
    pool: DbPool,
    ws_manager: Option<Arc<WsManager>>,
}

impl NotificationFanout {
    /// Create a new fan-out with the given pool and optional push channel.
    pub fn new(pool: DbPool, ws_manager: Option<Arc<WsManager>>) -> Self {
        Self { pool, ws_manager }
    }

    /// Notify affected students that a timetable entry was created, updated,
    /// or deleted. For deletions the caller passes the pre-deletion snapshot.
    ///
    /// Returns the number of notifications persisted.
    pub async fn notify_timetable_change(
        &self,
        entry: &TimetableEntryDetail,
        kind: ChangeKind,
    ) -> usize {
        let audience = Audience::students_of(entry.department_id, &entry.batch);
        let template = notification::timetable_change(kind, &entry.subject);
        self.notify_audience(&audience, &template, kind.notification_type())
            .await
    }

    /// Send the 15-minute class reminder to affected students.
    pub async fn notify_class_reminder(&self, entry: &TimetableEntryDetail) -> usize {
        let audience = Audience::students_of(entry.department_id, &entry.batch);
        let template = notification::class_reminder(&entry.subject, &entry.room_no);
        self.notify_audience(&audience, &template, notification::NOTIFY_CLASS_REMINDER)
            .await
    }

    /// Announce an auditorium booking to every active user.
    pub async fn notify_auditorium_booking(
        &self,
        room_no: &str,
        booking: &AuditoriumBooking,
    ) -> usize {
        let audience = Audience::all_active();
        let template = notification::auditorium_booking(
            room_no,
            &booking.event_name,
            booking.booking_date,
            booking.start_time,
            booking.end_time,
        );
        self.notify_audience(&audience, &template, notification::NOTIFY_AUDITORIUM_BOOKING)
            .await
    }

    /// Fan a chat message out to its resolved audience.
    pub async fn notify_message(
        &self,
        audience: &Audience,
        template: &NotificationTemplate,
    ) -> usize {
        self.notify_audience(audience, template, notification::NOTIFY_NEW_MESSAGE)
            .await
    }

    /// Notify a single user (direct messages).
    pub async fn notify_user(
        &self,
        user_id: DbId,
        template: &NotificationTemplate,
        notification_type: &str,
    ) -> usize {
        if self.deliver(user_id, template, notification_type).await {
            1
        } else {
            0
        }
    }

    /// Resolve the audience and deliver to each recipient.
    ///
    /// A failed delivery for one recipient is logged and never aborts the
    /// loop; the remaining recipients still get their notifications.
    async fn notify_audience(
        &self,
        audience: &Audience,
        template: &NotificationTemplate,
        notification_type: &str,
    ) -> usize {
        let recipients = match UserRepo::resolve_audience(&self.pool, audience).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(error = %e, notification_type, "Failed to resolve audience");
                return 0;
            }
        };

        let mut delivered = 0;
        for user_id in recipients {
            if self.deliver(user_id, template, notification_type).await {
                delivered += 1;
            }
        }

        tracing::debug!(delivered, notification_type, "Fan-out complete");
        delivered
    }

    /// Persist one notification row and push it over WebSocket.
    async fn deliver(
        &self,
        user_id: DbId,
        template: &NotificationTemplate,
        notification_type: &str,
    ) -> bool {
        let row = match NotificationRepo::create(
            &self.pool,
            user_id,
            &template.title,
            &template.body,
            notification_type,
        )
        .await
        {
            Ok(row) => row,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id,
                    notification_type,
                    "Failed to persist notification"
                );
                return false;
            }
        };

        // Best-effort push; send failures surface as closed channels inside
        // the manager and are ignored there.
        if let Some(ws) = &self.ws_manager {
            let payload = serde_json::json!({
                "type": "notification",
                "notification": row,
            });
            ws.send_to_user(user_id, Message::Text(payload.to_string().into()))
                .await;
        }

        true
    }
}
