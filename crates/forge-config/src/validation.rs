// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::ForgeConfig;

/// Log levels accepted by `agent.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &ForgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(dir) = &config.storage.base_dir
        && dir.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "storage.base_dir must not be empty when set".to_string(),
        });
    }

    let stale = config.session.stale_hours;
    if !stale.is_finite() || stale <= 0.0 {
        errors.push(ConfigError::Validation {
            message: format!("session.stale_hours must be a positive number, got {stale}"),
        });
    }

    if config.session.history_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "session.history_limit must be at least 1".to_string(),
        });
    }

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
