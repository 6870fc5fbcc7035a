//! Handler for the chat send path.
//!
//! Chat shares the notification fan-out contract: sending a message
//! persists one message row and fans a `new_message` notification out to
//! the resolved audience (or the single direct recipient).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campus_core::audience::{resolve_chat_audience, MessageScope, Sender};
use campus_core::error::CoreError;
use campus_core::notification::{self, NOTIFY_NEW_MESSAGE};
use campus_core::types::DbId;
use campus_db::repositories::{MessageRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /chat/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub message_type: MessageScope,
    pub content: String,
    pub target_department_id: Option<DbId>,
    pub target_batch: Option<String>,
    pub target_user_id: Option<DbId>,
}

/// POST /api/v1/chat/messages
///
/// Send a broadcast/department/batch/direct message. Role-based default
/// targeting applies when explicit targets are omitted. Returns 201 with
/// the message id and the number of recipients notified.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if input.content.trim().is_empty() {
        return Err(CoreError::Validation("content is required".to_string()).into());
    }

    let sender_row = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    let sender_name = sender_row.full_name();
    let sender = Sender {
        id: sender_row.id,
        role: sender_row.role,
        department_id: sender_row.department_id,
        batch: sender_row.batch,
    };

    let (message, notified) = match input.message_type {
        MessageScope::Direct => {
            let target_id = input.target_user_id.ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "target_user_id is required".to_string(),
                ))
            })?;
            let target = UserRepo::find_by_id(&state.pool, target_id)
                .await?
                .filter(|u| u.is_active)
                .ok_or(CoreError::NotFound {
                    entity: "User",
                    id: target_id,
                })?;

            let message = MessageRepo::create(
                &state.pool,
                sender.id,
                input.message_type.as_str(),
                &input.content,
                None,
                None,
                Some(target.id),
            )
            .await?;

            let template = notification::new_message(&sender_name, None, &input.content);
            let notified = state
                .fanout
                .notify_user(target.id, &template, NOTIFY_NEW_MESSAGE)
                .await;
            (message, notified)
        }
        scope => {
            let audience = resolve_chat_audience(
                &sender,
                scope,
                input.target_department_id,
                input.target_batch.clone(),
            )?;

            let message = MessageRepo::create(
                &state.pool,
                sender.id,
                scope.as_str(),
                &input.content,
                audience.department_id,
                audience.batch.as_deref(),
                None,
            )
            .await?;

            let template =
                notification::new_message(&sender_name, Some(scope.as_str()), &input.content);
            let notified = state.fanout.notify_message(&audience, &template).await;
            (message, notified)
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "data": { "message_id": message.id, "notified": notified }
        })),
    ))
}
