// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent registry trait for loading specialist agent configurations.

use async_trait::async_trait;

use crate::error::CleoError;
use crate::types::AgentRecord;

/// Source of agent configuration records (built-in catalogue, config file,
/// remote store, ...).
///
/// Loading may perform I/O and may fail; callers on the routing path are
/// expected to degrade gracefully rather than propagate the error.
#[async_trait]
pub trait AgentRegistry: Send + Sync {
    /// Returns the human-readable name of this registry, used in logs.
    fn name(&self) -> &str;

    /// Loads every agent known to this registry.
    async fn get_all_agents(&self) -> Result<Vec<AgentRecord>, CleoError>;
}
