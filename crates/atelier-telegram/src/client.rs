// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless HTTP wrapper around the Telegram `sendMessage` API.
//!
//! One text message per call, addressed by chat identifier. No delivery
//! receipts are consumed and nothing is retried here — callers decide
//! whether a failure matters.

use async_trait::async_trait;
use atelier_config::model::TelegramConfig;
use atelier_core::{AtelierError, Notifier};
use serde::Serialize;
use tracing::debug;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

/// Telegram Bot API client for outbound messages.
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{base}/bot{token}` — kept pre-joined so the token is formatted once.
    api_base: String,
}

impl TelegramClient {
    /// Creates a client from config. Requires `telegram.bot_token`.
    pub fn new(config: &TelegramConfig) -> Result<Self, AtelierError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            AtelierError::Config("telegram.bot_token is required for the bot".into())
        })?;
        if token.is_empty() {
            return Err(AtelierError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }
        Ok(Self::with_base_url(token, TELEGRAM_API_BASE))
    }

    /// Creates a client against an explicit API base URL (used in tests).
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: format!("{}/bot{token}", base_url.trim_end_matches('/')),
        }
    }

    /// Send one HTML-formatted text message.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AtelierError> {
        let url = format!("{}/sendMessage", self.api_base);
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AtelierError::Telegram {
                message: format!("sendMessage request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AtelierError::Telegram {
                message: format!("sendMessage returned {status}: {detail}"),
                source: None,
            });
        }

        debug!(chat_id, "message delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), AtelierError> {
        self.send_message(chat_id, text).await
    }
}
