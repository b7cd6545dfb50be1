// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared between the dialogue engine, storage, and gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Cursor of the lead-qualification dialogue for one conversation.
///
/// Transitions are monotonic along `Greeting -> Qualify -> Contact ->
/// Handover`. `Active` is a side door: only an operator reply puts a
/// conversation there. `Handover` and `Active` are terminal for the bot —
/// no automated replies are generated from either.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadState {
    Greeting,
    Qualify,
    Contact,
    Handover,
    Active,
}

impl LeadState {
    /// Decodes a stored state string, falling back to [`LeadState::Greeting`]
    /// for unknown or corrupted values so the dialogue restarts cleanly.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(LeadState::Greeting)
    }

    /// True once the bot has stopped auto-responding for this conversation.
    pub fn is_terminal(self) -> bool {
        matches!(self, LeadState::Handover | LeadState::Active)
    }
}

/// Direction of a logged message relative to the studio.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Profile snapshot of a message sender, as known at recording time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderProfile {
    pub id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// One lead, keyed by its Telegram chat identifier.
///
/// Created on first inbound webhook call, mutated by every subsequent
/// inbound call and by every operator reply. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Stable external identifier, primary key.
    pub chat_id: i64,
    pub user_id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Contact phone harvested during the `contact` state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact name harvested during the `contact` state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// State-machine cursor. Starts at `greeting`.
    #[serde(rename = "aiState")]
    pub state: LeadState,
    /// Index into the qualification script; present only while qualifying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_question: Option<u32>,
    /// Raw answers keyed `question_0` .. `question_4`. Append-only.
    pub answers: BTreeMap<String, String>,
    /// Epoch milliseconds.
    pub last_message_at: i64,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Inbound messages not yet seen by the operator.
    pub unread_count: i64,
}

impl Conversation {
    /// Creates a fresh conversation from the first inbound message.
    pub fn new(chat_id: i64, sender: SenderProfile, timestamp_ms: i64) -> Self {
        Self {
            chat_id,
            user_id: sender.id,
            first_name: sender.first_name,
            last_name: sender.last_name,
            username: sender.username,
            phone: None,
            name: None,
            state: LeadState::Greeting,
            current_question: None,
            answers: BTreeMap::new(),
            last_message_at: timestamp_ms,
            created_at: timestamp_ms,
            unread_count: 1,
        }
    }

    /// Registers another inbound message: bumps the activity timestamp and
    /// the operator's unread counter.
    pub fn touch_inbound(&mut self, timestamp_ms: i64) {
        self.last_message_at = timestamp_ms;
        self.unread_count += 1;
    }
}

/// One inbound or outgoing message. Immutable once created; the log per
/// chat is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: String,
    pub chat_id: i64,
    pub message_id: i64,
    pub from: SenderProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub direction: Direction,
    /// Conversation state at recording time. Audit trail only — never read
    /// back by the dialogue engine.
    #[serde(rename = "aiState", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}
