// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, router, and CLI.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where an agent configuration record came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentOrigin {
    /// Shipped with Cleo.
    #[default]
    Builtin,
    /// Defined by the user (config file or agents file).
    Custom,
}

/// An agent configuration record as returned by an [`AgentRegistry`](crate::AgentRegistry).
///
/// Routing only consumes `id` and `name`; the rest is carried for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default = "default_custom_origin")]
    pub origin: AgentOrigin,
}

fn default_custom_origin() -> AgentOrigin {
    AgentOrigin::Custom
}

impl AgentRecord {
    /// Create a custom agent record with only an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: Vec::new(),
            tools: Vec::new(),
            origin: AgentOrigin::Custom,
        }
    }
}
