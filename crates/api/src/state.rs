use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::SchedulingEngine;
use crate::notifications::NotificationFanout;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: campus_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (per-user push channels).
    pub ws_manager: Arc<WsManager>,
    /// The scheduling engine (conflict-checked mutations + fan-out).
    pub engine: Arc<SchedulingEngine>,
    /// Notification fan-out, used directly by the chat send path.
    pub fanout: Arc<NotificationFanout>,
}
