// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Cleo delegation routing.
//!
//! This crate provides the error type, the agent record types, the
//! [`AgentRegistry`] trait, and the [`Clock`] abstraction shared by the
//! rest of the workspace.

pub mod clock;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CleoError;
pub use traits::AgentRegistry;
pub use types::{AgentOrigin, AgentRecord};
