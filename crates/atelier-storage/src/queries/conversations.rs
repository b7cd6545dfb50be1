// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation CRUD operations.

use atelier_core::types::{Conversation, LeadState};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

const CONVERSATION_COLUMNS: &str = "chat_id, user_id, first_name, last_name, username, \
     phone, name, state, current_question, answers, last_message_at, created_at, unread_count";

fn row_to_conversation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Conversation> {
    let state: String = row.get(7)?;
    let answers: String = row.get(9)?;
    Ok(Conversation {
        chat_id: row.get(0)?,
        user_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        username: row.get(4)?,
        phone: row.get(5)?,
        name: row.get(6)?,
        // Unknown stored values restart the dialogue from the top.
        state: LeadState::from_stored(&state),
        current_question: row.get(8)?,
        answers: serde_json::from_str(&answers).unwrap_or_default(),
        last_message_at: row.get(10)?,
        created_at: row.get(11)?,
        unread_count: row.get(12)?,
    })
}

/// Get a conversation by chat id.
pub async fn get_conversation(
    db: &Database,
    chat_id: i64,
) -> Result<Option<Conversation>, atelier_core::AtelierError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE chat_id = ?1"
            ))?;
            let result = stmt.query_row(params![chat_id], row_to_conversation);
            match result {
                Ok(conversation) => Ok(Some(conversation)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or fully replace a conversation record.
pub async fn upsert_conversation(
    db: &Database,
    conversation: &Conversation,
) -> Result<(), atelier_core::AtelierError> {
    let c = conversation.clone();
    let answers = serde_json::to_string(&c.answers).map_err(|e| {
        atelier_core::AtelierError::Storage {
            source: Box::new(e),
        }
    })?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations (chat_id, user_id, first_name, last_name, username,
                     phone, name, state, current_question, answers, last_message_at, created_at,
                     unread_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                 ON CONFLICT(chat_id) DO UPDATE SET
                     user_id = excluded.user_id,
                     first_name = excluded.first_name,
                     last_name = excluded.last_name,
                     username = excluded.username,
                     phone = excluded.phone,
                     name = excluded.name,
                     state = excluded.state,
                     current_question = excluded.current_question,
                     answers = excluded.answers,
                     last_message_at = excluded.last_message_at,
                     created_at = excluded.created_at,
                     unread_count = excluded.unread_count",
                params![
                    c.chat_id,
                    c.user_id,
                    c.first_name,
                    c.last_name,
                    c.username,
                    c.phone,
                    c.name,
                    c.state.to_string(),
                    c.current_question,
                    answers,
                    c.last_message_at,
                    c.created_at,
                    c.unread_count,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List all conversations, newest activity first.
pub async fn list_conversations(
    db: &Database,
) -> Result<Vec<Conversation>, atelier_core::AtelierError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONVERSATION_COLUMNS} FROM conversations ORDER BY last_message_at DESC"
            ))?;
            let rows = stmt.query_map([], row_to_conversation)?;
            let mut conversations = Vec::new();
            for row in rows {
                conversations.push(row?);
            }
            Ok(conversations)
        })
        .await
        .map_err(map_tr_err)
}

/// Reset the unread counter. No-op for an unknown chat id.
pub async fn mark_read(db: &Database, chat_id: i64) -> Result<(), atelier_core::AtelierError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE conversations SET unread_count = 0 WHERE chat_id = ?1",
                params![chat_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
