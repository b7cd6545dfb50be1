// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. The same router drives
//! both the Telegram webhook and the operator inbox UI.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use atelier_core::AtelierError;

use crate::handlers;
use crate::state::AppState;
use crate::webhook;

/// Gateway server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/telegram/webhook",
            post(webhook::post_webhook).get(webhook::get_webhook),
        )
        .route("/api/conversations", get(handlers::list_conversations))
        .route(
            "/api/conversations/{chat_id}/messages",
            get(handlers::chat_messages),
        )
        .route("/api/conversations/{chat_id}/read", post(handlers::mark_read))
        .route("/api/conversations/{chat_id}/send", post(handlers::send_reply))
        .route("/api/uploads/presign", post(handlers::presign_upload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway server and serve until the process exits.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), AtelierError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AtelierError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AtelierError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
