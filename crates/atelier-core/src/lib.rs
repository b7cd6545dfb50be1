// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Atelier lead-inbox backend.
//!
//! Provides the shared error type, domain types, and the collaborator
//! traits (`LeadStore`, `Notifier`) implemented by the storage and
//! telegram crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::AtelierError;
pub use traits::{LeadStore, Notifier};
pub use types::{Conversation, Direction, LeadState, SenderProfile, StoredMessage};
