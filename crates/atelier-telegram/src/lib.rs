// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram integration for the Atelier lead inbox.
//!
//! Webhook-mode: inbound updates arrive as JSON at the gateway and are
//! deserialized with the [`wire`] types; outbound messages go through the
//! [`TelegramClient`], which implements the
//! [`Notifier`](atelier_core::Notifier) seam.

pub mod client;
pub mod wire;

pub use client::TelegramClient;
