// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Session Forge configuration system.

use figment::Jail;
use forge_config::diagnostic::ConfigError;
use forge_config::{load_and_validate_str, load_config, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_forge_config() {
    let toml = r#"
[agent]
log_level = "debug"

[storage]
base_dir = "/tmp/forge-data"

[session]
stale_hours = 6.5
history_limit = 25
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.storage.base_dir.as_deref(), Some("/tmp/forge-data"));
    assert_eq!(config.session.stale_hours, 6.5);
    assert_eq!(config.session.history_limit, 25);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.storage.base_dir.is_none());
    assert_eq!(config.session.stale_hours, 24.0);
    assert_eq!(config.session.history_limit, 10);
}

#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[session]
stale_hour = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "stale_hour");
            assert_eq!(suggestion.as_deref(), Some("stale_hours"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[session]
history_limit = "many"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }));
}

#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[session]
stale_hours = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero stale hours is invalid");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn env_dir_overrides_base_dir() {
    Jail::expect_with(|jail| {
        jail.set_env("SESSION_FORGE_DIR", "/tmp/from-env");
        jail.set_env("SESSION_FORGE_STALE_HOURS", "48");
        let config = load_config()?;
        assert_eq!(config.storage.base_dir.as_deref(), Some("/tmp/from-env"));
        assert_eq!(config.session.stale_hours, 48.0);
        Ok(())
    });
}

#[test]
fn local_file_is_overridden_by_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "forge.toml",
            r#"
[agent]
log_level = "warn"

[storage]
base_dir = "/tmp/from-file"
"#,
        )?;
        jail.set_env("SESSION_FORGE_LOG_LEVEL", "debug");
        let config = load_config()?;
        assert_eq!(config.storage.base_dir.as_deref(), Some("/tmp/from-file"));
        assert_eq!(config.agent.log_level, "debug");
        Ok(())
    });
}

#[test]
fn unrelated_prefixed_env_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("SESSION_FORGE_SOMETHING_ELSE", "1");
        let config = load_config()?;
        assert_eq!(config.session.history_limit, 10);
        Ok(())
    });
}
