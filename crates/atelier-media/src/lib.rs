// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object-store support for portfolio photo uploads.
//!
//! Produces presigned PUT URLs for an S3-compatible bucket (Cloudflare R2)
//! so the browser uploads directly; the server only signs.

pub mod keys;
pub mod presign;

pub use keys::photo_key;
pub use presign::{BucketPresigner, PresignedUpload};
