//! Unit tests for `WsManager`.
//!
//! These tests exercise the WebSocket connection manager directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, per-user
//! delivery, and graceful shutdown behaviour.

use axum::extract::ws::Message;
use campus_api::ws::WsManager;

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() increments the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_increments_connection_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1).await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: remove() decrements the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_decrements_connection_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1).await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: send_to_user() reaches every connection of that user and no other
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_user_targets_only_that_user() {
    let manager = WsManager::new();

    let mut user1_a = manager.add("conn-1".to_string(), 1).await;
    let mut user1_b = manager.add("conn-2".to_string(), 1).await;
    let mut user2 = manager.add("conn-3".to_string(), 2).await;

    let sent = manager
        .send_to_user(1, Message::Text("hello".into()))
        .await;
    assert_eq!(sent, 2);

    assert!(matches!(user1_a.try_recv(), Ok(Message::Text(_))));
    assert!(matches!(user1_b.try_recv(), Ok(Message::Text(_))));
    assert!(user2.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: send_to_user() to an absent user delivers nowhere
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_absent_user_sends_nothing() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn-1".to_string(), 1).await;

    let sent = manager.send_to_user(99, Message::Text("hi".into())).await;
    assert_eq!(sent, 0);
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: broadcast() reaches every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_reaches_all_connections() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), 1).await;
    let mut rx2 = manager.add("conn-2".to_string(), 2).await;

    manager.broadcast(Message::Text("everyone".into())).await;

    assert!(matches!(rx1.try_recv(), Ok(Message::Text(_))));
    assert!(matches!(rx2.try_recv(), Ok(Message::Text(_))));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close frames and clears the map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn-1".to_string(), 1).await;

    manager.shutdown_all().await;

    assert!(matches!(rx.try_recv(), Ok(Message::Close(_))));
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: ping_all() sends Ping frames
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_sends_ping_frames() {
    let manager = WsManager::new();

    let mut rx = manager.add("conn-1".to_string(), 1).await;

    manager.ping_all().await;

    assert!(matches!(rx.try_recv(), Ok(Message::Ping(_))));
}

// ---------------------------------------------------------------------------
// Test: sending into a dropped receiver is silently skipped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closed_channel_does_not_panic() {
    let manager = WsManager::new();

    let rx = manager.add("conn-1".to_string(), 1).await;
    drop(rx);

    // Count still reports the connection; the dead channel is ignored.
    let sent = manager.send_to_user(1, Message::Text("hi".into())).await;
    assert_eq!(sent, 1);
}
