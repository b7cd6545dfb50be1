// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object-key generation for portfolio photos.

use chrono::Utc;

/// Generate a unique bucket key for an uploaded photo, preserving the
/// original file extension: `photos/{timestamp}-{random}.{ext}`.
pub fn photo_key(file_name: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    photo_key_with(Utc::now().timestamp_millis(), &suffix[..12], file_name)
}

fn photo_key_with(timestamp_ms: i64, random: &str, file_name: &str) -> String {
    let extension = file_name.rsplit('.').next().filter(|e| !e.is_empty() && *e != file_name);
    format!(
        "photos/{timestamp_ms}-{random}.{}",
        extension.unwrap_or("jpg")
    )
}
