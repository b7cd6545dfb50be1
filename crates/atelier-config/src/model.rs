// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Atelier backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, producing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Atelier configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; integrations without credentials stay disabled.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AtelierConfig {
    /// Studio identity and logging settings.
    #[serde(default)]
    pub studio: StudioConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Inbox/webhook HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Object-store (R2) settings for portfolio photo uploads.
    #[serde(default)]
    pub media: MediaConfig,
}

/// Studio identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Display name of the studio, used in logs.
    #[serde(default = "default_studio_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            name: default_studio_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_studio_name() -> String {
    "atelier".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the bot integration.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Expected `X-Telegram-Bot-Api-Secret-Token` webhook header value.
    /// `None` skips the check.
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("atelier").join("atelier.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("atelier.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Inbox/webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Object-store configuration for portfolio photo uploads.
///
/// Targets any S3-compatible endpoint; defaults are shaped for Cloudflare
/// R2. Presigning is disabled unless all credential fields are present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// R2 account identifier (forms the endpoint hostname).
    #[serde(default)]
    pub account_id: Option<String>,

    /// Access key id for SigV4 signing.
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key for SigV4 signing.
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Bucket holding portfolio photos.
    #[serde(default)]
    pub bucket: Option<String>,

    /// Public base URL objects are served from after upload.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Signing region. R2 uses the literal region `auto`.
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            access_key_id: None,
            secret_access_key: None,
            bucket: None,
            public_base_url: None,
            region: default_region(),
        }
    }
}

fn default_region() -> String {
    "auto".to_string()
}

impl MediaConfig {
    /// True when every field needed for presigning is present.
    pub fn is_configured(&self) -> bool {
        self.account_id.is_some()
            && self.access_key_id.is_some()
            && self.secret_access_key.is_some()
            && self.bucket.is_some()
            && self.public_base_url.is_some()
    }
}
