// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`LeadStore`] implementation backed by the SQLite database.
//!
//! The gateway depends on the trait, not on this crate's query modules, so
//! tests can substitute an in-memory double without touching SQLite.

use async_trait::async_trait;

use atelier_core::types::{Conversation, StoredMessage};
use atelier_core::{AtelierError, LeadStore};

use crate::database::Database;
use crate::queries;

#[async_trait]
impl LeadStore for Database {
    async fn conversation(&self, chat_id: i64) -> Result<Option<Conversation>, AtelierError> {
        queries::conversations::get_conversation(self, chat_id).await
    }

    async fn upsert_conversation(&self, conversation: &Conversation) -> Result<(), AtelierError> {
        queries::conversations::upsert_conversation(self, conversation).await
    }

    async fn conversations(&self) -> Result<Vec<Conversation>, AtelierError> {
        queries::conversations::list_conversations(self).await
    }

    async fn mark_read(&self, chat_id: i64) -> Result<(), AtelierError> {
        queries::conversations::mark_read(self, chat_id).await
    }

    async fn append_message(&self, message: &StoredMessage) -> Result<(), AtelierError> {
        queries::messages::append_message(self, message).await
    }

    async fn messages(&self, chat_id: i64) -> Result<Vec<StoredMessage>, AtelierError> {
        queries::messages::messages_for_chat(self, chat_id).await
    }
}
