//! Change-notification fan-out.
//!
//! [`NotificationFanout`] materializes one notification row per member of a
//! resolved audience in response to one state-changing event, then attempts
//! a best-effort real-time push per recipient.

mod fanout;

pub use fanout::NotificationFanout;
