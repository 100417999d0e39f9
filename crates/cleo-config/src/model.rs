// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Cleo.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Cleo configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CleoConfig {
    /// Assistant identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Delegation routing and routing cache settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// External agent registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Custom specialist agents defined inline via `[[agents]]`.
    #[serde(default)]
    pub agents: Vec<AgentSpecConfig>,
}

/// Assistant identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the general-purpose assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "cleo".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Delegation routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Enable delegation routing. When false, every message is answered directly.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Enable the explicit-mention fast path (`@toby`, `ask emma`, ...).
    #[serde(default = "default_true")]
    pub early_exit: bool,

    /// Enable the in-memory routing cache.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Seconds a cached routing stays valid after its last hit.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached routings before the oldest is evicted.
    #[serde(default = "default_cache_max_size")]
    pub cache_max_size: usize,

    /// Minimum confidence a routing needs to be cached.
    #[serde(default = "default_cache_min_confidence")]
    pub cache_min_confidence: f64,

    /// Seconds between background sweeps of expired cache entries.
    #[serde(default = "default_cache_cleanup_interval_secs")]
    pub cache_cleanup_interval_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            early_exit: true,
            cache_enabled: true,
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_size: default_cache_max_size(),
            cache_min_confidence: default_cache_min_confidence(),
            cache_cleanup_interval_secs: default_cache_cleanup_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_cache_max_size() -> usize {
    1000
}

fn default_cache_min_confidence() -> f64 {
    0.7
}

fn default_cache_cleanup_interval_secs() -> u64 {
    300
}

/// External agent registry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Path to a TOML file with `[[agents]]` entries, re-read on every lookup.
    /// `None` means only built-in and inline agents are known.
    #[serde(default)]
    pub agents_file: Option<String>,
}

/// A custom specialist agent declared in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSpecConfig {
    /// Stable identifier used as the delegation target, e.g. `cleo-test`.
    pub id: String,

    /// Display name matched against message text.
    pub name: String,

    /// One-line description shown by `cleo agents`.
    #[serde(default)]
    pub description: Option<String>,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Tool names available to the agent.
    #[serde(default)]
    pub tools: Vec<String>,
}
