// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency wiring for `atelier serve`.

use std::sync::Arc;

use atelier_config::AtelierConfig;
use atelier_core::{AtelierError, LeadStore, Notifier};
use atelier_gateway::{start_server, AppState, ServerConfig};
use atelier_media::BucketPresigner;
use atelier_storage::Database;
use atelier_telegram::TelegramClient;
use tracing::{info, warn};

/// Open the store, build the collaborators, and serve until shutdown.
pub async fn run(config: AtelierConfig) -> Result<(), AtelierError> {
    let database = Database::open_with_options(
        &config.storage.database_path,
        config.storage.wal_mode,
    )
    .await?;
    let store: Arc<dyn LeadStore> = Arc::new(database);

    let notifier: Arc<dyn Notifier> = Arc::new(TelegramClient::new(&config.telegram)?);

    let presigner = if config.media.is_configured() {
        Some(Arc::new(BucketPresigner::from_config(&config.media)?))
    } else {
        warn!("media storage not configured; photo uploads are disabled");
        None
    };

    let state = AppState::new(
        store,
        notifier,
        presigner,
        config.telegram.webhook_secret.clone(),
    );

    info!(
        studio = %config.studio.name,
        database = %config.storage.database_path,
        "starting atelier"
    );

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    start_server(&server_config, state).await
}
