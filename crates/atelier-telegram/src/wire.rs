// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram Bot API wire types for the webhook payload.
//!
//! Only the fields the ingress consumes are modeled; everything else in the
//! payload is ignored (serde is non-strict here on purpose — Telegram adds
//! fields between API versions).

use atelier_core::types::SenderProfile;
use serde::Deserialize;

/// One webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    /// Absent for non-message updates (edits, channel posts, ...), which
    /// the ingress acknowledges without processing.
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

/// An inbound message inside an update.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    /// Absent for anonymous channel posts.
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    /// Epoch seconds.
    pub date: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default)]
    pub contact: Option<Contact>,
}

impl IncomingMessage {
    /// Message timestamp in epoch milliseconds.
    pub fn timestamp_ms(&self) -> i64 {
        self.date * 1000
    }

    /// Sender profile snapshot, if the message has a sender.
    pub fn sender_profile(&self) -> Option<SenderProfile> {
        self.from.as_ref().map(|u| SenderProfile {
            id: u.id,
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            username: u.username.clone(),
        })
    }

    /// Text to record in the message log: the message text, or a
    /// placeholder for photo/document payloads (media is never fetched
    /// from Telegram).
    pub fn log_text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }
        if self.photo.is_some() {
            return Some("📷 Фото отправлено".to_string());
        }
        if self.document.is_some() {
            return Some("📎 Документ отправлен".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// A platform-native "share contact" payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_update_json() -> serde_json::Value {
        serde_json::json!({
            "update_id": 1001,
            "message": {
                "message_id": 5,
                "date": 1700000000i64,
                "chat": { "id": 42, "type": "private", "first_name": "Ivan" },
                "from": { "id": 42, "is_bot": false, "first_name": "Ivan", "username": "ivan" },
                "text": "хочу кухню"
            }
        })
    }

    #[test]
    fn text_update_deserializes() {
        let update: Update = serde_json::from_value(text_update_json()).unwrap();
        let msg = update.message.unwrap();
        assert_eq!(msg.chat.id, 42);
        assert_eq!(msg.timestamp_ms(), 1_700_000_000_000);
        assert_eq!(msg.text.as_deref(), Some("хочу кухню"));
        assert_eq!(msg.log_text().as_deref(), Some("хочу кухню"));
        let profile = msg.sender_profile().unwrap();
        assert_eq!(profile.id, 42);
        assert_eq!(profile.username.as_deref(), Some("ivan"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut json = text_update_json();
        json["message"]["sticker"] = serde_json::json!({"file_id": "abc"});
        json["message"]["via_bot"] = serde_json::json!({"id": 1, "first_name": "b"});
        let update: Update = serde_json::from_value(json).unwrap();
        assert!(update.message.is_some());
    }

    #[test]
    fn update_without_message_deserializes() {
        let update: Update =
            serde_json::from_value(serde_json::json!({ "update_id": 7 })).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn photo_message_gets_placeholder_text() {
        let json = serde_json::json!({
            "update_id": 2,
            "message": {
                "message_id": 6,
                "date": 1700000000i64,
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 42, "is_bot": false, "first_name": "Ivan" },
                "photo": [
                    { "file_id": "f1", "file_unique_id": "u1", "width": 90, "height": 60 },
                    { "file_id": "f2", "file_unique_id": "u2", "width": 720, "height": 480, "file_size": 12345 }
                ]
            }
        });
        let update: Update = serde_json::from_value(json).unwrap();
        let msg = update.message.unwrap();
        assert!(msg.text.is_none());
        assert_eq!(msg.log_text().as_deref(), Some("📷 Фото отправлено"));
    }

    #[test]
    fn contact_share_deserializes() {
        let json = serde_json::json!({
            "update_id": 3,
            "message": {
                "message_id": 7,
                "date": 1700000000i64,
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 42, "is_bot": false, "first_name": "Anna" },
                "contact": {
                    "phone_number": "+79160000000",
                    "first_name": "Anna",
                    "user_id": 42
                }
            }
        });
        let update: Update = serde_json::from_value(json).unwrap();
        let contact = update.message.unwrap().contact.unwrap();
        assert_eq!(contact.phone_number, "+79160000000");
        assert_eq!(contact.first_name, "Anna");
        assert!(contact.last_name.is_none());
    }

    #[test]
    fn message_without_sender_is_representable() {
        let json = serde_json::json!({
            "update_id": 4,
            "message": {
                "message_id": 8,
                "date": 1700000000i64,
                "chat": { "id": -100123, "type": "channel" },
                "text": "post"
            }
        });
        let update: Update = serde_json::from_value(json).unwrap();
        let msg = update.message.unwrap();
        assert!(msg.from.is_none());
        assert!(msg.sender_profile().is_none());
    }
}
