// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Architectural decision log, capped at the last 200.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use forge_core::{ForgeError, format_timestamp};
use forge_storage::{CollectionStore, Deletion, ViewItem};

use crate::types::{DecisionEntry, DecisionsData};

/// Fields a caller supplies for a new decision.
#[derive(Debug, Clone, Default)]
pub struct NewDecision {
    pub choice: String,
    pub alternatives: Vec<String>,
    pub reasoning: String,
    pub outcome: Option<String>,
    pub project: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Decisions {
    store: CollectionStore<DecisionsData>,
}

impl Decisions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: CollectionStore::new(path),
        }
    }

    pub fn store(&self) -> &CollectionStore<DecisionsData> {
        &self.store
    }

    pub fn record(&self, new: NewDecision, now: DateTime<Utc>) -> Result<DecisionEntry, ForgeError> {
        let entry = DecisionEntry {
            timestamp: format_timestamp(now),
            choice: new.choice,
            alternatives: new.alternatives,
            reasoning: new.reasoning,
            outcome: new.outcome,
            project: new.project,
            tags: new.tags,
        };
        self.store.append(entry.clone())?;
        Ok(entry)
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<DecisionEntry> {
        self.store.search(query, limit)
    }

    pub fn list(&self, query: Option<&str>, limit: usize) -> Vec<ViewItem> {
        self.store.list(query, limit)
    }

    pub fn delete(&self, index: usize, query: Option<&str>) -> Result<Deletion<DecisionEntry>, ForgeError> {
        self.store.delete_at(index, query)
    }
}
