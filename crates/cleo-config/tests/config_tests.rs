// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Cleo configuration system.

use std::io::Write;

use cleo_config::diagnostic::ConfigError;
use cleo_config::model::CleoConfig;
use cleo_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// A file touching every section deserializes into the expected values.
#[test]
fn full_toml_deserializes_into_cleo_config() {
    let toml = r#"
[agent]
name = "cleo"
log_level = "debug"

[routing]
enabled = true
early_exit = false
cache_enabled = true
cache_ttl_secs = 120
cache_max_size = 50
cache_min_confidence = 0.8
cache_cleanup_interval_secs = 30

[registry]
agents_file = "/tmp/agents.toml"

[[agents]]
id = "cleo-test"
name = "cleo_test"
tags = ["qa"]

[[agents]]
id = "nova-travel"
name = "Nova"
description = "Trip planning"
tools = ["search_flights"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.log_level, "debug");
    assert!(!config.routing.early_exit);
    assert_eq!(config.routing.cache_ttl_secs, 120);
    assert_eq!(config.routing.cache_max_size, 50);
    assert_eq!(config.routing.cache_min_confidence, 0.8);
    assert_eq!(config.routing.cache_cleanup_interval_secs, 30);
    assert_eq!(
        config.registry.agents_file.as_deref(),
        Some("/tmp/agents.toml")
    );
    assert_eq!(config.agents.len(), 2);
    assert_eq!(config.agents[0].id, "cleo-test");
    assert_eq!(config.agents[0].tags, vec!["qa"]);
    assert_eq!(config.agents[1].description.as_deref(), Some("Trip planning"));
    assert_eq!(config.agents[1].tools, vec!["search_flights"]);
}

/// Empty input falls back to compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "cleo");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.routing.enabled);
    assert!(config.routing.early_exit);
    assert!(config.routing.cache_enabled);
    assert_eq!(config.routing.cache_ttl_secs, 3600);
    assert_eq!(config.routing.cache_max_size, 1000);
    assert_eq!(config.routing.cache_min_confidence, 0.7);
    assert_eq!(config.routing.cache_cleanup_interval_secs, 300);
    assert!(config.registry.agents_file.is_none());
    assert!(config.agents.is_empty());
}

/// Serialized defaults equal what an empty file produces.
#[test]
fn serialized_defaults_round_trip_through_toml() {
    let rendered = toml::to_string(&CleoConfig::default()).expect("defaults serialize");
    let config = load_config_from_str(&rendered).expect("rendered defaults parse");
    assert_eq!(config.routing.cache_max_size, 1000);
    assert_eq!(config.agent.name, "cleo");
}

/// Unknown key in [routing] carries a typo suggestion.
#[test]
fn unknown_routing_key_suggests_correction() {
    let toml = r#"
[routing]
cache_ttl_sec = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "cache_ttl_sec"
                && suggestion.as_deref() == Some("cache_ttl_secs")
                && valid_keys.contains("cache_max_size")
        })
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[supabase]
url = "https://example.invalid"
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("supabase"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// An `[[agents]]` entry without an id is a missing-key error.
#[test]
fn agent_without_id_is_missing_key() {
    let toml = r#"
[[agents]]
name = "Nova"
"#;

    let errors = load_and_validate_str(toml).expect_err("id is required");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "id")),
        "got: {errors:?}"
    );
}

/// Wrong value type is reported as InvalidType.
#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[routing]
cache_max_size = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after successful deserialization.
#[test]
fn validation_rejects_zero_ttl() {
    let toml = r#"
[routing]
cache_ttl_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero ttl should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("cache_ttl_secs"))
    ));
}

/// Loading from an explicit path reports unknown keys with suggestions.
#[test]
fn load_from_path_reports_unknown_key() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[agent]\nnaem = \"cleo\"").expect("write temp config");

    let errors = load_and_validate_path(file.path()).expect_err("typo should fail");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, .. }
            if key == "naem" && suggestion.as_deref() == Some("name"))
    });
    assert!(found, "expected UnknownKey for `naem`, got: {errors:?}");
}

/// ConfigError renders through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "cache_ttl_sec".to_string(),
        suggestion: Some("cache_ttl_secs".to_string()),
        valid_keys: "cache_ttl_secs, cache_max_size".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `cache_ttl_secs`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("cache_ttl_sec"));
}
