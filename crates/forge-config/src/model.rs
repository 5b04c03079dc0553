// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Session Forge.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Session Forge configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ForgeConfig {
    /// Process-level settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Where documents are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session checkpoint lifecycle settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage location configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Base directory for every document. `None` uses the platform default
    /// (`%APPDATA%\session-forge` on Windows, `~/.session-forge` elsewhere).
    #[serde(default)]
    pub base_dir: Option<String>,
}

/// Session checkpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Age in hours after which an active checkpoint is archived on restore.
    #[serde(default = "default_stale_hours")]
    pub stale_hours: f64,

    /// Default number of archived checkpoints returned by `session_history`.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stale_hours: default_stale_hours(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_stale_hours() -> f64 {
    24.0
}

fn default_history_limit() -> usize {
    10
}
