// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Atelier backend.
//!
//! Three surfaces behind one router: the Telegram webhook ingress, the
//! operator inbox API, and the photo-upload presign endpoint. All handlers
//! are thin orchestration over the [`LeadStore`](atelier_core::LeadStore),
//! the [`Notifier`](atelier_core::Notifier), and the dialogue engine.

pub mod handlers;
pub mod server;
pub mod state;
pub mod webhook;

pub use server::{build_router, start_server, ServerConfig};
pub use state::AppState;
