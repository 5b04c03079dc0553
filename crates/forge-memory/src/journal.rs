// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session journal: the story of each session, capped at the last 100.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use forge_core::{ForgeError, format_timestamp};
use forge_storage::{CollectionStore, Deletion, ViewItem};

use crate::types::{JournalData, JournalEntry};

/// Default count for [`Journal::recall`].
pub const DEFAULT_RECALL: usize = 3;

/// Fields a caller supplies for a new journal entry.
#[derive(Debug, Clone, Default)]
pub struct NewJournalEntry {
    pub summary: String,
    pub key_moments: Vec<String>,
    pub emotional_context: Option<String>,
    pub breakthroughs: Vec<String>,
    pub frustrations: Vec<String>,
    pub collaboration_notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Journal {
    store: CollectionStore<JournalData>,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: CollectionStore::new(path),
        }
    }

    pub fn store(&self) -> &CollectionStore<JournalData> {
        &self.store
    }

    pub fn record(&self, new: NewJournalEntry, now: DateTime<Utc>) -> Result<JournalEntry, ForgeError> {
        let entry = JournalEntry {
            timestamp: format_timestamp(now),
            session_summary: new.summary,
            key_moments: new.key_moments,
            emotional_context: new.emotional_context,
            breakthroughs: new.breakthroughs,
            frustrations: new.frustrations,
            collaboration_notes: new.collaboration_notes,
        };
        self.store.append(entry.clone())?;
        Ok(entry)
    }

    /// The most recent `count` sessions, oldest first.
    pub fn recall(&self, count: usize) -> Vec<JournalEntry> {
        self.store.recent(count)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<JournalEntry> {
        self.store.search(query, limit)
    }

    pub fn list(&self, query: Option<&str>, limit: usize) -> Vec<ViewItem> {
        self.store.list(query, limit)
    }

    pub fn delete(&self, index: usize, query: Option<&str>) -> Result<Deletion<JournalEntry>, ForgeError> {
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

    fn entry(summary: &str) -> NewJournalEntry {
        NewJournalEntry {
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn record_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("journal.json"));
        let recorded = journal.record(entry("paired on parser"), at(0)).unwrap();

        assert_eq!(recorded.timestamp, "2026-01-01T00:00:00.000Z");
        assert_eq!(recorded.session_summary, "paired on parser");
        assert!(recorded.key_moments.is_empty());
        assert!(recorded.emotional_context.is_none());
    }

    #[test]
    fn recall_returns_latest_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("journal.json"));
        for (n, s) in ["one", "two", "three", "four"].iter().enumerate() {
            journal.record(entry(s), at(n as i64)).unwrap();
        }

        let recalled: Vec<_> = journal
            .recall(DEFAULT_RECALL)
            .into_iter()
            .map(|e| e.session_summary)
            .collect();
        assert_eq!(recalled, vec!["two", "three", "four"]);
        assert_eq!(journal.recall(10).len(), 4);
    }

    #[test]
    fn search_covers_breakthroughs() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("journal.json"));
        let mut with_breakthrough = entry("quiet day");
        with_breakthrough.breakthroughs = vec!["lifetimes finally clicked".into()];
        journal.record(with_breakthrough, at(0)).unwrap();
        journal.record(entry("refactor"), at(1)).unwrap();

        let found = journal.search("Lifetimes", 20);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].session_summary, "quiet day");
    }
}
