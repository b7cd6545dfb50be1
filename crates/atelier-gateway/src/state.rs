// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for axum request handlers.

use std::sync::Arc;

use atelier_core::{LeadStore, Notifier};
use atelier_dialog::DialogEngine;
use atelier_media::BucketPresigner;

/// Everything the handlers need, behind cheap clones.
#[derive(Clone)]
pub struct AppState {
    /// Conversation + message persistence.
    pub store: Arc<dyn LeadStore>,
    /// Outbound Telegram sends (operator replies, greeting).
    pub notifier: Arc<dyn Notifier>,
    /// The dialogue state machine.
    pub engine: Arc<DialogEngine>,
    /// Upload presigner; `None` when media storage is not configured.
    pub presigner: Option<Arc<BucketPresigner>>,
    /// Expected webhook secret header value; `None` skips the check.
    pub webhook_secret: Option<String>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LeadStore>,
        notifier: Arc<dyn Notifier>,
        presigner: Option<Arc<BucketPresigner>>,
        webhook_secret: Option<String>,
    ) -> Self {
        let engine = Arc::new(DialogEngine::new(notifier.clone()));
        Self {
            store,
            notifier,
            engine,
            presigner,
            webhook_secret,
            start_time: std::time::Instant::now(),
        }
    }
}
