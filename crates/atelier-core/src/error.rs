// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Atelier workspace.

use thiserror::Error;

/// The primary error type used across all Atelier crates.
#[derive(Debug, Error)]
pub enum AtelierError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Telegram Bot API errors (send failure, malformed response).
    #[error("telegram error: {message}")]
    Telegram {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Object-store errors (presign input rejected, missing bucket config).
    #[error("media error: {0}")]
    Media(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
