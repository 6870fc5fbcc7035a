//! WebSocket infrastructure for real-time notification push.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes. Connections are bound to an
//! authenticated user at upgrade time so the fan-out can address pushes
//! per user.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
