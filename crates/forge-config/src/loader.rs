// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Hierarchy: `./forge.toml` > `<config_dir>/session-forge/forge.toml` > compiled
//! defaults, with `SESSION_FORGE_*` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ForgeConfig;

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "forge.toml";

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "SESSION_FORGE_";

/// Environment keys (prefix stripped, lowercased) and the config path each one sets.
const ENV_KEYS: &[(&str, &str)] = &[
    ("dir", "storage.base_dir"),
    ("stale_hours", "session.stale_hours"),
    ("history_limit", "session.history_limit"),
    ("log_level", "agent.log_level"),
];

/// `<config_dir>/session-forge/forge.toml`, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("session-forge").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `<config_dir>/session-forge/forge.toml`
/// 3. `./forge.toml`
/// 4. `SESSION_FORGE_*` environment variables
pub fn load_config() -> Result<ForgeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ForgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ForgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ForgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ForgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    let user = user_config_path().unwrap_or_default();
    for file in [user.as_path(), Path::new(LOCAL_CONFIG_FILE)] {
        if file.is_file() {
            tracing::debug!(path = %file.display(), "config file found");
        }
    }

    Figment::new()
        .merge(Serialized::defaults(ForgeConfig::default()))
        .merge(Toml::file(&user))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with an explicit key table.
///
/// `SESSION_FORGE_DIR` is the historical name for the base directory, so keys
/// are mapped one by one instead of split on `_`. Unlisted variables are
/// ignored rather than rejected as unknown fields.
fn env_provider() -> Env {
    let known: Vec<&str> = ENV_KEYS.iter().map(|(key, _)| *key).collect();
    Env::prefixed(ENV_PREFIX).only(&known).map(|key| {
        let key_str = key.as_str();
        ENV_KEYS
            .iter()
            .find(|(env_key, _)| key_str.eq_ignore_ascii_case(env_key))
            .map(|(_, path)| path.to_string())
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}
