// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk layout under one base directory.

use std::path::{Path, PathBuf};

use forge_config::model::StorageConfig;
use forge_core::ForgeError;

/// Directory name used under the platform config dir on Windows.
const APP_DIR: &str = "session-forge";

/// Every file and directory Session Forge reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub base: PathBuf,
    pub profile: PathBuf,
    pub journal: PathBuf,
    pub decisions: PathBuf,
    pub dead_ends: PathBuf,
    pub sessions: PathBuf,
    pub active_session: PathBuf,
    pub session_history: PathBuf,
}

impl StorePaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let sessions = base.join("sessions");
        Self {
            profile: base.join("profile.json"),
            journal: base.join("journal.json"),
            decisions: base.join("decisions.json"),
            dead_ends: base.join("dead-ends.json"),
            active_session: sessions.join("active.json"),
            session_history: sessions.join("history"),
            sessions,
            base,
        }
    }

    /// Resolve the base directory from config, falling back to the platform default.
    pub fn resolve(config: &StorageConfig) -> Result<Self, ForgeError> {
        match config.base_dir.as_deref() {
            Some(dir) => Ok(Self::new(expand_home(dir))),
            None => default_base_dir().map(Self::new).ok_or_else(|| {
                ForgeError::Config(
                    "cannot determine a home directory; set SESSION_FORGE_DIR".to_string(),
                )
            }),
        }
    }

    /// Where an archived checkpoint with this timestamp is written.
    pub fn archive_path(&self, timestamp: &str) -> PathBuf {
        self.session_history.join(archive_file_name(timestamp))
    }
}

/// `%APPDATA%/session-forge` on Windows, `~/.session-forge` elsewhere.
pub fn default_base_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    } else {
        dirs::home_dir().map(|home| home.join(".session-forge"))
    }
}

/// `session_<timestamp>.json`, with `:` and `.` replaced by `-`.
pub fn archive_file_name(timestamp: &str) -> String {
    let stem: String = timestamp
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    format!("session_{stem}.json")
}

fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    Path::new(dir).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_base() {
        let paths = StorePaths::new("/data/forge");
        assert_eq!(paths.profile, Path::new("/data/forge/profile.json"));
        assert_eq!(paths.dead_ends, Path::new("/data/forge/dead-ends.json"));
        assert_eq!(
            paths.active_session,
            Path::new("/data/forge/sessions/active.json")
        );
        assert_eq!(paths.session_history, Path::new("/data/forge/sessions/history"));
    }

    #[test]
    fn archive_name_replaces_colons_and_dots() {
        assert_eq!(
            archive_file_name("2026-03-01T10:15:30.123Z"),
            "session_2026-03-01T10-15-30-123Z.json"
        );
    }

    #[test]
    fn archive_path_lives_in_history() {
        let paths = StorePaths::new("/tmp/f");
        assert_eq!(
            paths.archive_path("2026-01-01T00:00:00.000Z"),
            Path::new("/tmp/f/sessions/history/session_2026-01-01T00-00-00-000Z.json")
        );
    }

    #[test]
    fn resolve_prefers_configured_dir() {
        let config = StorageConfig {
            base_dir: Some("/srv/forge".to_string()),
        };
        assert_eq!(StorePaths::resolve(&config).unwrap().base, Path::new("/srv/forge"));
    }

    #[test]
    fn resolve_expands_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = StorageConfig {
            base_dir: Some("~/forge".to_string()),
        };
        assert_eq!(StorePaths::resolve(&config).unwrap().base, home.join("forge"));
    }
}
