// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each accepts `&Database` and runs its SQL through
//! the single serialized connection.

pub mod conversations;
pub mod messages;
