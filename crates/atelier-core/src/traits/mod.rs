// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits decoupling the dialogue engine and gateway from
//! their concrete backends.

pub mod notify;
pub mod store;

pub use notify::Notifier;
pub use store::LeadStore;
