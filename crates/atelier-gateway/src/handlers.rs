// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator inbox API and upload presigning.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use atelier_core::types::{Conversation, Direction, LeadState, SenderProfile, StoredMessage};

use crate::state::AppState;

/// Body for POST /api/conversations/{chat_id}/send.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub text: String,
}

/// Body for POST /api/uploads/presign.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub content_type: String,
}

/// Response for POST /api/uploads/presign.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub success: bool,
    pub presigned_url: String,
    pub public_url: String,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<StoredMessage>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub success: bool,
    pub message: StoredMessage,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `{"ok": true}` acknowledgement used on the webhook boundary.
pub fn ok_ack() -> Response {
    Json(serde_json::json!({ "ok": true })).into_response()
}

/// Opaque 500; details stay in the logs, never in the response.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/conversations — newest activity first.
pub async fn list_conversations(State(state): State<AppState>) -> Response {
    match state.store.conversations().await {
        Ok(conversations) => Json(ConversationListResponse { conversations }).into_response(),
        Err(e) => {
            warn!(error = %e, "conversation listing failed");
            internal_error()
        }
    }
}

/// GET /api/conversations/{chat_id}/messages — chronological log.
pub async fn chat_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
) -> Response {
    match state.store.messages(chat_id).await {
        Ok(messages) => Json(MessageListResponse { messages }).into_response(),
        Err(e) => {
            warn!(chat_id, error = %e, "message listing failed");
            internal_error()
        }
    }
}

/// POST /api/conversations/{chat_id}/read — operator has seen the chat.
pub async fn mark_read(State(state): State<AppState>, Path(chat_id): Path<i64>) -> Response {
    match state.store.mark_read(chat_id).await {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => {
            warn!(chat_id, error = %e, "mark read failed");
            internal_error()
        }
    }
}

/// POST /api/conversations/{chat_id}/send — operator reply.
///
/// Forces the conversation into `active` (the bot stays out of it from
/// here) and resets the unread counter. Unlike the bot path, a failed
/// Telegram send is surfaced: the operator is watching.
pub async fn send_reply(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
    Json(body): Json<SendRequest>,
) -> Response {
    let text = body.text.trim();
    if text.is_empty() {
        return bad_request("message text is required");
    }

    let mut conversation = match state.store.conversation(chat_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "conversation not found".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            warn!(chat_id, error = %e, "conversation load failed");
            return internal_error();
        }
    };

    if let Err(e) = state.notifier.send_text(chat_id, text).await {
        warn!(chat_id, error = %e, "operator reply delivery failed");
        return (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "failed to deliver message".to_string(),
            }),
        )
            .into_response();
    }

    let now_ms = chrono::Utc::now().timestamp_millis();
    let stored = StoredMessage {
        id: format!("msg-out-{now_ms}-{chat_id}"),
        chat_id,
        message_id: now_ms,
        from: SenderProfile {
            id: 0,
            first_name: "Admin".to_string(),
            last_name: None,
            username: None,
        },
        text: Some(text.to_string()),
        photo_url: None,
        document_url: None,
        timestamp: now_ms,
        direction: Direction::Outgoing,
        state: Some(LeadState::Active.to_string()),
    };
    if let Err(e) = state.store.append_message(&stored).await {
        warn!(chat_id, error = %e, "message append failed");
        return internal_error();
    }

    conversation.state = LeadState::Active;
    conversation.unread_count = 0;
    if let Err(e) = state.store.upsert_conversation(&conversation).await {
        warn!(chat_id, error = %e, "conversation upsert failed");
        return internal_error();
    }

    Json(SendResponse {
        success: true,
        message: stored,
    })
    .into_response()
}

/// POST /api/uploads/presign — time-limited PUT URL for a portfolio photo.
pub async fn presign_upload(
    State(state): State<AppState>,
    Json(body): Json<PresignRequest>,
) -> Response {
    if body.file_name.trim().is_empty() || body.content_type.trim().is_empty() {
        return bad_request("fileName and contentType are required");
    }
    if !body.content_type.starts_with("image/") {
        return bad_request("only images are allowed");
    }

    let Some(presigner) = &state.presigner else {
        warn!("presign requested but media storage is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "media storage is not configured".to_string(),
            }),
        )
            .into_response();
    };

    let key = atelier_media::photo_key(&body.file_name);
    let signed = presigner.presign_put(&key, &body.content_type, chrono::Utc::now());

    Json(PresignResponse {
        success: true,
        presigned_url: signed.upload_url,
        public_url: signed.public_url,
        file_name: key,
    })
    .into_response()
}
