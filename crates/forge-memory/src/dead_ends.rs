// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Debugging dead ends, capped at the last 100.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use forge_core::{ForgeError, format_timestamp};
use forge_storage::{CollectionStore, Deletion, ViewItem};

use crate::types::{DeadEndEntry, DeadEndsData};

/// Fields a caller supplies for a new dead end.
#[derive(Debug, Clone, Default)]
pub struct NewDeadEnd {
    pub attempted: String,
    pub why_failed: String,
    pub lesson: Option<String>,
    pub project: Option<String>,
    pub files_involved: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DeadEnds {
    store: CollectionStore<DeadEndsData>,
}

impl DeadEnds {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: CollectionStore::new(path),
        }
    }

    pub fn store(&self) -> &CollectionStore<DeadEndsData> {
        &self.store
    }

    pub fn record(&self, new: NewDeadEnd, now: DateTime<Utc>) -> Result<DeadEndEntry, ForgeError> {
        let entry = DeadEndEntry {
            timestamp: format_timestamp(now),
            attempted: new.attempted,
            why_failed: new.why_failed,
            lesson: new.lesson.unwrap_or_default(),
            project: new.project,
            files_involved: new.files_involved,
            tags: new.tags,
        };
        self.store.append(entry.clone())?;
        Ok(entry)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<DeadEndEntry> {
        self.store.search(query, limit)
    }

    pub fn list(&self, query: Option<&str>, limit: usize) -> Vec<ViewItem> {
        self.store.list(query, limit)
    }

    pub fn delete(&self, index: usize, query: Option<&str>) -> Result<Deletion<DeadEndEntry>, ForgeError> {
        self.store.delete_at(index, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    fn tried(what: &str) -> NewDeadEnd {
        NewDeadEnd {
            attempted: what.to_string(),
            why_failed: "did not help".into(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_lesson_is_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        let dead_ends = DeadEnds::new(dir.path().join("dead-ends.json"));
        let entry = dead_ends.record(tried("tried X"), at(0)).unwrap();
        assert_eq!(entry.lesson, "");
        assert!(entry.project.is_none());
    }

    #[test]
    fn list_delete_list_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let dead_ends = DeadEnds::new(dir.path().join("dead-ends.json"));
        for (n, what) in ["tried X", "tried Y", "tried Z"].iter().enumerate() {
            dead_ends.record(tried(what), at(n as i64)).unwrap();
        }

        let view = dead_ends.list(None, 10);
        let shown: Vec<_> = view.iter().map(|v| (v.index, v.preview.as_str())).collect();
        assert_eq!(shown, vec![(1, "tried X"), (2, "tried Y"), (3, "tried Z")]);

        let deletion = dead_ends.delete(2, None).unwrap();
        assert_eq!(deletion.removed.attempted, "tried Y");
        assert_eq!(deletion.remaining, 2);

        let view = dead_ends.list(None, 10);
        let shown: Vec<_> = view.iter().map(|v| (v.index, v.preview.as_str())).collect();
        assert_eq!(shown, vec![(1, "tried X"), (2, "tried Z")]);
    }

    #[test]
    fn delete_on_empty_collection_fails_without_range() {
        let dir = tempfile::tempdir().unwrap();
        let dead_ends = DeadEnds::new(dir.path().join("dead-ends.json"));
        let err = dead_ends.delete(1, None).unwrap_err();
        assert!(matches!(err, ForgeError::IndexOutOfRange { len: 0, .. }));
        assert_eq!(err.valid_range(), None);
    }
}
