// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./cleo.toml` > `~/.config/cleo/cleo.toml` > `/etc/cleo/cleo.toml`
//! with environment variable overrides via `CLEO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CleoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cleo/cleo.toml` (system-wide)
/// 3. `~/.config/cleo/cleo.toml` (user XDG config)
/// 4. `./cleo.toml` (local directory)
/// 5. `CLEO_*` environment variables
pub fn load_config() -> Result<CleoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CleoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CleoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CleoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CleoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CleoConfig::default()))
        .merge(Toml::file("/etc/cleo/cleo.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("cleo/cleo.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("cleo.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `CLEO_ROUTING_CACHE_TTL_SECS`
/// must map to `routing.cache_ttl_secs`, not `routing.cache.ttl.secs`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("CLEO_").map(|key| map_env_key(&key.as_str().to_lowercase()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    key.replacen("agent_", "agent.", 1)
        .replacen("routing_", "routing.", 1)
        .replacen("registry_", "registry.", 1)
}
