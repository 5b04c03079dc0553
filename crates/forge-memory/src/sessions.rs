// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session checkpoints: one active snapshot plus an immutable archive.
//!
//! A checkpoint overwrites `sessions/active.json`. Completion, or a restore
//! that finds the snapshot older than the stale threshold, moves it into
//! `sessions/history/` and deletes the active file. Archives are never pruned.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use forge_core::{ForgeError, format_timestamp, parse_timestamp};
use forge_storage::json_store;
use forge_storage::paths::archive_file_name;
use tracing::{info, warn};

use crate::types::{CheckpointStatus, SessionCheckpoint};

/// Summary recorded when completion is called without one.
pub const DEFAULT_COMPLETION_SUMMARY: &str = "Task completed";
/// Default count for [`SessionStore::history`].
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Fields a caller supplies for a checkpoint.
#[derive(Debug, Clone, Default)]
pub struct NewCheckpoint {
    pub task: String,
    pub intent: String,
    pub next_steps: Vec<String>,
    pub status: Option<CheckpointStatus>,
    pub files_touched: Vec<String>,
    pub recent_actions: Vec<String>,
    pub context: serde_json::Map<String, serde_json::Value>,
    pub tool_call_count: u64,
}

/// What a restore found.
#[derive(Debug, Clone, PartialEq)]
pub enum Restore {
    NoSession,
    /// Older than the threshold; already archived and removed.
    /// `age_hours` is `None` when the timestamp could not be parsed.
    Stale {
        checkpoint: SessionCheckpoint,
        age_hours: Option<f64>,
    },
    Active {
        checkpoint: SessionCheckpoint,
        age_minutes: i64,
    },
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    active: PathBuf,
    history: PathBuf,
}

impl SessionStore {
    pub fn new(active: impl Into<PathBuf>, history: impl Into<PathBuf>) -> Self {
        Self {
            active: active.into(),
            history: history.into(),
        }
    }

    /// The active checkpoint, if any.
    pub fn active(&self) -> Option<SessionCheckpoint> {
        json_store::load(&self.active, None)
    }

    pub fn has_active(&self) -> bool {
        self.active().is_some()
    }

    /// Overwrite the active checkpoint. The returned timestamp is its id.
    ///
    /// `COMPLETED` is reserved for [`SessionStore::complete`] and is rejected here.
    pub fn checkpoint(
        &self,
        new: NewCheckpoint,
        now: DateTime<Utc>,
    ) -> Result<SessionCheckpoint, ForgeError> {
        let status = new.status.unwrap_or_default();
        if status == CheckpointStatus::Completed {
            return Err(ForgeError::InvalidInput(
                "status COMPLETED is set by session completion".to_string(),
            ));
        }

        let checkpoint = SessionCheckpoint {
            timestamp: format_timestamp(now),
            task: new.task,
            intent: new.intent,
            status,
            files_touched: new.files_touched,
            recent_actions: new.recent_actions,
            next_steps: new.next_steps,
            context: new.context,
            tool_call_count: new.tool_call_count,
            completed_at: None,
            summary: None,
        };
        json_store::save(&self.active, &checkpoint)?;
        info!(task = %checkpoint.task, status = checkpoint.status.as_str(), "checkpoint saved");
        Ok(checkpoint)
    }

    /// Look for interrupted work, archiving it if older than `stale_hours`.
    pub fn restore(&self, now: DateTime<Utc>, stale_hours: f64) -> Result<Restore, ForgeError> {
        let Some(checkpoint) = self.active() else {
            return Ok(Restore::NoSession);
        };

        let age_hours = parse_timestamp(&checkpoint.timestamp)
            .map(|saved| (now - saved).num_milliseconds() as f64 / 3_600_000.0);

        match age_hours {
            Some(hours) if hours <= stale_hours => {
                let age_minutes = (hours * 60.0).round() as i64;
                Ok(Restore::Active {
                    checkpoint,
                    age_minutes,
                })
            }
            _ => {
                if age_hours.is_none() {
                    warn!(timestamp = %checkpoint.timestamp, "unparsable checkpoint timestamp, treating as stale");
                }
                self.archive(&checkpoint)?;
                json_store::remove(&self.active);
                info!(task = %checkpoint.task, ?age_hours, "stale checkpoint archived");
                Ok(Restore::Stale {
                    checkpoint,
                    age_hours,
                })
            }
        }
    }

    /// Mark the active checkpoint completed, archive it and clear it.
    ///
    /// Returns `None` when there is nothing to complete.
    pub fn complete(
        &self,
        summary: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionCheckpoint>, ForgeError> {
        let Some(mut checkpoint) = self.active() else {
            return Ok(None);
        };

        checkpoint.status = CheckpointStatus::Completed;
        checkpoint.completed_at = Some(format_timestamp(now));
        checkpoint.summary =
            Some(summary.unwrap_or_else(|| DEFAULT_COMPLETION_SUMMARY.to_string()));

        self.archive(&checkpoint)?;
        json_store::remove(&self.active);
        info!(task = %checkpoint.task, "session completed");
        Ok(Some(checkpoint))
    }

    /// The `limit` most recent archives, oldest first.
    pub fn history(&self, limit: usize) -> Result<Vec<SessionCheckpoint>, ForgeError> {
        let names = self.archive_names()?;
        let start = names.len().saturating_sub(limit);
        Ok(names[start..]
            .iter()
            .filter_map(|name| json_store::load(&self.history.join(name), None))
            .collect())
    }

    /// Number of archived checkpoints.
    pub fn archive_count(&self) -> Result<usize, ForgeError> {
        Ok(self.archive_names()?.len())
    }

    fn archive(&self, checkpoint: &SessionCheckpoint) -> Result<(), ForgeError> {
        let path = self.history.join(archive_file_name(&checkpoint.timestamp));
        json_store::save(&path, checkpoint)
    }

    /// Archive file names in lexical (and therefore chronological) order.
    fn archive_names(&self) -> Result<Vec<String>, ForgeError> {
        let dir = match std::fs::read_dir(&self.history) {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ForgeError::storage(e)),
        };

        let mut names: Vec<String> = dir
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with("session_") && name.ends_with(".json"))
            .collect();
        names.sort();
        Ok(names)
    }
}
