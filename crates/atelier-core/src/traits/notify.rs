// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notification seam.

use async_trait::async_trait;

use crate::error::AtelierError;

/// Sends one text message to a chat on the messaging platform.
///
/// Fire-and-forget: no delivery receipts are consumed and callers on the
/// bot path must not let a failed send block a state transition.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), AtelierError>;
}
