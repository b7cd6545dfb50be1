// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message-log operations. The log is append-only; rows are never updated.

use atelier_core::types::{Direction, SenderProfile, StoredMessage};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

const MESSAGE_COLUMNS: &str = "id, chat_id, message_id, from_id, from_first_name, \
     from_last_name, from_username, text, photo_url, document_url, timestamp, direction, state";

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredMessage> {
    let direction: String = row.get(11)?;
    Ok(StoredMessage {
        id: row.get(0)?,
        chat_id: row.get(1)?,
        message_id: row.get(2)?,
        from: SenderProfile {
            id: row.get(3)?,
            first_name: row.get(4)?,
            last_name: row.get(5)?,
            username: row.get(6)?,
        },
        text: row.get(7)?,
        photo_url: row.get(8)?,
        document_url: row.get(9)?,
        timestamp: row.get(10)?,
        direction: direction.parse().unwrap_or(Direction::Incoming),
        state: row.get(12)?,
    })
}

/// Append one message to the log.
///
/// `INSERT OR IGNORE`: the platform redelivers updates on timeout, and a
/// replayed message id must not fail the whole webhook call.
pub async fn append_message(
    db: &Database,
    message: &StoredMessage,
) -> Result<(), atelier_core::AtelierError> {
    let m = message.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO messages (id, chat_id, message_id, from_id, from_first_name,
                     from_last_name, from_username, text, photo_url, document_url, timestamp,
                     direction, state)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    m.id,
                    m.chat_id,
                    m.message_id,
                    m.from.id,
                    m.from.first_name,
                    m.from.last_name,
                    m.from.username,
                    m.text,
                    m.photo_url,
                    m.document_url,
                    m.timestamp,
                    m.direction.to_string(),
                    m.state,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// The message log for one chat, chronological.
pub async fn messages_for_chat(
    db: &Database,
    chat_id: i64,
) -> Result<Vec<StoredMessage>, atelier_core::AtelierError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM messages WHERE chat_id = ?1 ORDER BY timestamp ASC"
            ))?;
            let rows = stmt.query_map(params![chat_id], row_to_message)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}
