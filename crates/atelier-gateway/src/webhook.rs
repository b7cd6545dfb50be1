// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram webhook ingress.
//!
//! Orchestration only: loads or creates the conversation record, records
//! the raw message, delegates to the dialogue engine, and persists the
//! mutated record last. Malformed or non-message updates are acknowledged
//! without touching anything (Telegram retries on non-2xx, so rejecting
//! them would only replay garbage).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use atelier_core::types::{Conversation, Direction, StoredMessage};
use atelier_dialog::ContactShare;
use atelier_telegram::wire;

use crate::handlers::{internal_error, ok_ack};
use crate::state::AppState;

const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// POST /telegram/webhook — one update per call.
pub async fn post_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<wire::Update>,
) -> Response {
    if let Some(expected) = &state.webhook_secret {
        let provided = headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if provided != expected.as_str() {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "unauthorized" })),
            )
                .into_response();
        }
    }

    // Only message updates are processed.
    let Some(message) = update.message else {
        return ok_ack();
    };
    // A message without a sender (channel post) carries nothing for us.
    let Some(sender) = message.sender_profile() else {
        return ok_ack();
    };

    let chat_id = message.chat.id;
    let timestamp_ms = message.timestamp_ms();

    let mut conversation = match state.store.conversation(chat_id).await {
        Ok(Some(existing)) => {
            let mut c = existing;
            c.touch_inbound(timestamp_ms);
            c
        }
        Ok(None) => {
            let c = Conversation::new(chat_id, sender.clone(), timestamp_ms);
            // The greeting is the ingress's own hello; the state machine
            // sends question 0 on the same call below.
            if let Err(e) = state
                .notifier
                .send_text(chat_id, atelier_dialog::script::GREETING_MESSAGE)
                .await
            {
                warn!(chat_id, error = %e, "greeting delivery failed");
            }
            c
        }
        Err(e) => {
            warn!(chat_id, error = %e, "conversation load failed");
            return internal_error();
        }
    };

    if let Some(contact) = &message.contact {
        let share = ContactShare {
            phone_number: contact.phone_number.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
        };
        state.engine.apply_contact(&mut conversation, &share).await;
    }

    // Record the raw message with the state it arrived in.
    let stored = StoredMessage {
        id: format!("msg-{}-{chat_id}", message.message_id),
        chat_id,
        message_id: message.message_id,
        from: sender,
        text: message.log_text(),
        photo_url: None,
        document_url: None,
        timestamp: timestamp_ms,
        direction: Direction::Incoming,
        state: Some(conversation.state.to_string()),
    };
    if let Err(e) = state.store.append_message(&stored).await {
        warn!(chat_id, error = %e, "message append failed");
        return internal_error();
    }

    match &message.text {
        Some(text) if !conversation.state.is_terminal() => {
            state.engine.advance(&mut conversation, text).await;
        }
        // Media-only first contact skips the greeting exchange.
        None => {
            state.engine.advance_media_only(&mut conversation).await;
        }
        Some(_) => {} // terminal: logged above, bot stays silent
    }

    if let Err(e) = state.store.upsert_conversation(&conversation).await {
        warn!(chat_id, error = %e, "conversation upsert failed");
        return internal_error();
    }

    ok_ack()
}

/// GET /telegram/webhook — Telegram's reachability probe.
pub async fn get_webhook() -> Response {
    ok_ack()
}
