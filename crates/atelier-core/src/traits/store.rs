// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store seam for conversations and the message log.
//!
//! No transactional guarantee is assumed beyond single-writer-at-a-time
//! correctness: two concurrent webhook deliveries for the same chat can
//! race on read-modify-write, the later upsert winning.

use async_trait::async_trait;

use crate::error::AtelierError;
use crate::types::{Conversation, StoredMessage};

/// Persistence operations the gateway and tests depend on.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Fetch one conversation by chat id.
    async fn conversation(&self, chat_id: i64) -> Result<Option<Conversation>, AtelierError>;

    /// Insert or fully replace a conversation record.
    async fn upsert_conversation(&self, conversation: &Conversation) -> Result<(), AtelierError>;

    /// All conversations, newest activity first.
    async fn conversations(&self) -> Result<Vec<Conversation>, AtelierError>;

    /// Reset the unread counter for a conversation. No-op if absent.
    async fn mark_read(&self, chat_id: i64) -> Result<(), AtelierError>;

    /// Append one message to the log.
    async fn append_message(&self, message: &StoredMessage) -> Result<(), AtelierError>;

    /// The message log for one chat, chronological.
    async fn messages(&self, chat_id: i64) -> Result<Vec<StoredMessage>, AtelierError>;
}
