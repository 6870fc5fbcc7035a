//! Periodic 15-minute class reminders.
//!
//! Polls the weekly grid once a minute for entries starting in the
//! `[now+15min, now+16min)` window on the current weekday and fans a
//! reminder out to affected students. A durable `(entry, date)` dedup log
//! guarantees at-most-once firing even when poll windows overlap an
//! insertion boundary or the process restarts mid-window.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, TimeDelta};
use tokio_util::sync::CancellationToken;

use campus_db::repositories::{ReminderLogRepo, TimetableRepo};
use campus_db::DbPool;

use crate::notifications::NotificationFanout;

/// How often the reminder job polls.
const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Reminder lead time before class start, in minutes.
const LEAD_MINUTES: i64 = 15;

/// Run the class-reminder loop until `cancel` is triggered.
///
/// Times are campus wall clock (local), matching the weekly grid.
pub async fn run(pool: DbPool, fanout: Arc<NotificationFanout>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = POLL_INTERVAL.as_secs(),
        lead_minutes = LEAD_MINUTES,
        "Class reminder job started"
    );

    let mut interval = tokio::time::interval(POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Class reminder job stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = tick(&pool, &fanout).await {
                    tracing::error!(error = %e, "Class reminder cycle failed");
                }
            }
        }
    }
}

/// One poll cycle: find entries starting in the lookahead window and remind
/// students about each at most once per day.
async fn tick(pool: &DbPool, fanout: &NotificationFanout) -> Result<(), sqlx::Error> {
    let now = Local::now();
    let day_of_week = now.weekday().num_days_from_monday() as i16;
    let today = now.date_naive();

    let window_start = (now + TimeDelta::minutes(LEAD_MINUTES)).time();
    let window_end = (now + TimeDelta::minutes(LEAD_MINUTES + 1)).time();

    // The window wraps past midnight into the next weekday for one poll
    // around 23:44; those entries belong to tomorrow's grid and are picked
    // up by tomorrow's polls.
    if window_end <= window_start {
        return Ok(());
    }

    let upcoming =
        TimetableRepo::starting_between(pool, day_of_week, window_start, window_end).await?;

    for entry in upcoming {
        if ReminderLogRepo::try_claim(pool, entry.id, today).await? {
            let delivered = fanout.notify_class_reminder(&entry).await;
            tracing::info!(
                entry_id = entry.id,
                subject = %entry.subject,
                delivered,
                "Class reminder sent"
            );
        }
    }

    Ok(())
}
