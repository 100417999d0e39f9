// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: positive cache bounds,
//! a confidence floor inside `[0, 1]`, and unique custom agent identities.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CleoConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &CleoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level must be one of {}, got `{}`",
            LOG_LEVELS.join(", "),
            config.agent.log_level
        )));
    }

    let routing = &config.routing;
    if routing.cache_ttl_secs == 0 {
        errors.push(ConfigError::validation(
            "routing.cache_ttl_secs must be greater than 0",
        ));
    }
    if routing.cache_max_size == 0 {
        errors.push(ConfigError::validation(
            "routing.cache_max_size must be greater than 0",
        ));
    }
    if routing.cache_cleanup_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "routing.cache_cleanup_interval_secs must be greater than 0",
        ));
    }
    if !(0.0..=1.0).contains(&routing.cache_min_confidence) {
        errors.push(ConfigError::validation(format!(
            "routing.cache_min_confidence must be between 0.0 and 1.0, got {}",
            routing.cache_min_confidence
        )));
    }

    if let Some(path) = &config.registry.agents_file
        && path.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "registry.agents_file must not be empty when set",
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    for (i, agent) in config.agents.iter().enumerate() {
        if agent.id.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "agents[{i}].id must not be empty"
            )));
        } else if !seen_ids.insert(agent.id.as_str()) {
            errors.push(ConfigError::validation(format!(
                "duplicate agent id `{}` in [[agents]] array",
                agent.id
            )));
        }

        if agent.name.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "agents[{i}].name must not be empty"
            )));
        } else if !seen_names.insert(agent.name.to_lowercase()) {
            errors.push(ConfigError::validation(format!(
                "duplicate agent name `{}` in [[agents]] array",
                agent.name
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
