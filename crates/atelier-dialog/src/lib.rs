// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead-qualification dialogue controller.
//!
//! Tracks each lead through a linear sequence of states (greeting ->
//! qualification questions -> contact collection -> handover -> active
//! human-operator mode) and decides, for every inbound message, what
//! automated reply (if any) to send. State lives entirely in the
//! [`Conversation`](atelier_core::types::Conversation) record; the engine
//! mutates it in place and leaves persistence to the caller.

pub mod engine;
pub mod extract;
pub mod script;

pub use engine::{ContactShare, DialogEngine};
