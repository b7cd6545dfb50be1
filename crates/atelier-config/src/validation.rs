// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. All failures are collected and returned together rather than
//! failing on the first one.

use crate::diagnostic::ConfigError;
use crate::model::AtelierConfig;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &AtelierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let host = config.gateway.host.trim();
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.host `{host}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.port must be non-zero".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    // Media credentials are all-or-nothing: a partially configured bucket
    // would fail at presign time with a much worse error.
    let media = &config.media;
    let media_fields = [
        ("media.account_id", media.account_id.is_some()),
        ("media.access_key_id", media.access_key_id.is_some()),
        ("media.secret_access_key", media.secret_access_key.is_some()),
        ("media.bucket", media.bucket.is_some()),
        ("media.public_base_url", media.public_base_url.is_some()),
    ];
    let set_count = media_fields.iter().filter(|(_, set)| *set).count();
    if set_count > 0 && set_count < media_fields.len() {
        let missing: Vec<&str> = media_fields
            .iter()
            .filter(|(_, set)| !set)
            .map(|(name, _)| *name)
            .collect();
        errors.push(ConfigError::Validation {
            message: format!(
                "media storage is partially configured; missing: {}",
                missing.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
