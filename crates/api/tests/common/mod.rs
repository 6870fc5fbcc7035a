//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router with the production middleware stack
//! and sends requests through `tower::ServiceExt` without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use campus_api::auth::jwt::{generate_access_token, JwtConfig};
use campus_api::config::ServerConfig;
use campus_api::engine::SchedulingEngine;
use campus_api::notifications::NotificationFanout;
use campus_api::routes;
use campus_api::state::AppState;
use campus_api::ws::WsManager;
use campus_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Mint an access token the way the identity provider would.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_jwt_config()).expect("token generation")
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let ws_manager = Arc::new(WsManager::new());
    let fanout = Arc::new(NotificationFanout::new(
        pool.clone(),
        Some(Arc::clone(&ws_manager)),
    ));
    let engine = Arc::new(SchedulingEngine::new(pool.clone(), Arc::clone(&fanout)));

    let state = AppState {
        pool,
        config: Arc::new(config),
        ws_manager,
        engine,
        fanout,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn request(method: Method, path: &str, token: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .expect("request build")
}

pub async fn get(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(request(Method::GET, path, token, Body::empty()))
        .await
        .expect("request")
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(request(
        Method::POST,
        path,
        token,
        Body::from(body.to_string()),
    ))
    .await
    .expect("request")
}

pub async fn post_empty(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(request(Method::POST, path, token, Body::empty()))
        .await
        .expect("request")
}

pub async fn put_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(request(
        Method::PUT,
        path,
        token,
        Body::from(body.to_string()),
    ))
    .await
    .expect("request")
}

pub async fn delete(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(request(Method::DELETE, path, token, Body::empty()))
        .await
        .expect("request")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a department, returning its id.
pub async fn seed_department(pool: &PgPool, name: &str, code: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO departments (name, code) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(code)
        .fetch_one(pool)
        .await
        .expect("seed department")
}

/// Insert a user, returning their id.
pub async fn seed_user(
    pool: &PgPool,
    email: &str,
    role: &str,
    department_id: Option<DbId>,
    batch: Option<&str>,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (email, first_name, last_name, role, department_id, batch) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(email)
    .bind("Test")
    .bind("User")
    .bind(role)
    .bind(department_id)
    .bind(batch)
    .fetch_one(pool)
    .await
    .expect("seed user")
}

/// Insert a room, returning its id.
pub async fn seed_room(pool: &PgPool, room_no: &str, room_type: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO classrooms (room_no, capacity, room_type) VALUES ($1, 60, $2) RETURNING id",
    )
    .bind(room_no)
    .bind(room_type)
    .fetch_one(pool)
    .await
    .expect("seed room")
}

/// Count notifications of a type addressed to a user.
pub async fn notification_count(pool: &PgPool, user_id: DbId, notification_type: &str) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND notification_type = $2",
    )
    .bind(user_id)
    .bind(notification_type)
    .fetch_one(pool)
    .await
    .expect("count notifications")
}
