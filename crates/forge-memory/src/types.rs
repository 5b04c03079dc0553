// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory domain types: entries, their documents, the profile and the
//! session checkpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use forge_core::format_timestamp;
use forge_storage::retention::{DEAD_ENDS_CAP, DECISIONS_CAP, JOURNAL_CAP};
use forge_storage::{CollectionDocument, Entry};
use serde::{Deserialize, Serialize};

// ---- Journal ----

/// One session's story: what happened and how it felt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: String,
    pub session_summary: String,
    #[serde(default)]
    pub key_moments: Vec<String>,
    #[serde(default)]
    pub emotional_context: Option<String>,
    #[serde(default)]
    pub breakthroughs: Vec<String>,
    #[serde(default)]
    pub frustrations: Vec<String>,
    #[serde(default)]
    pub collaboration_notes: Option<String>,
}

impl Entry for JournalEntry {
    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn search_text(&self) -> String {
        let mut parts = vec![self.session_summary.as_str()];
        parts.extend(self.key_moments.iter().map(String::as_str));
        parts.extend(self.breakthroughs.iter().map(String::as_str));
        parts.extend(self.frustrations.iter().map(String::as_str));
        parts.push(self.emotional_context.as_deref().unwrap_or_default());
        parts.push(self.collaboration_notes.as_deref().unwrap_or_default());
        parts.join(" ")
    }

    fn summary(&self) -> String {
        self.session_summary.clone()
    }
}

/// `journal.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub sessions: Vec<JournalEntry>,
}

// ---- Decisions ----

/// A choice made, with the alternatives and reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub timestamp: String,
    pub choice: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    pub reasoning: String,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entry for DecisionEntry {
    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn search_text(&self) -> String {
        let mut parts = vec![
            self.choice.as_str(),
            self.reasoning.as_str(),
            self.project.as_deref().unwrap_or_default(),
        ];
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.alternatives.iter().map(String::as_str));
        parts.push(self.outcome.as_deref().unwrap_or_default());
        parts.join(" ")
    }

    fn summary(&self) -> String {
        self.choice.clone()
    }
}

/// `decisions.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub decisions: Vec<DecisionEntry>,
}

// ---- Dead ends ----

/// An approach that failed, and what to remember about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadEndEntry {
    pub timestamp: String,
    pub attempted: String,
    pub why_failed: String,
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub files_involved: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entry for DeadEndEntry {
    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn search_text(&self) -> String {
        let mut parts = vec![
            self.attempted.as_str(),
            self.why_failed.as_str(),
            self.lesson.as_str(),
            self.project.as_deref().unwrap_or_default(),
        ];
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }

    fn summary(&self) -> String {
        self.attempted.clone()
    }
}

/// `dead-ends.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeadEndsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub dead_ends: Vec<DeadEndEntry>,
}

macro_rules! collection_document {
    ($doc:ty, $item:ty, $field:ident, $name:literal, $cap:expr) => {
        impl CollectionDocument for $doc {
            type Item = $item;
            const NAME: &'static str = $name;
            const CAP: usize = $cap;

            fn entries(&self) -> &[$item] {
                &self.$field
            }

            fn entries_mut(&mut self) -> &mut Vec<$item> {
                &mut self.$field
            }

            fn schema_version(&self) -> Option<u32> {
                self.schema_version
            }

            fn set_schema_version(&mut self, version: u32) {
                self.schema_version = Some(version);
            }
        }
    };
}

collection_document!(JournalData, JournalEntry, sessions, "journal", JOURNAL_CAP);
collection_document!(DecisionsData, DecisionEntry, decisions, "decisions", DECISIONS_CAP);
collection_document!(DeadEndsData, DeadEndEntry, dead_ends, "dead_ends", DEAD_ENDS_CAP);

// ---- Profile ----

/// A dated observation about the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileNote {
    pub content: String,
    pub timestamp: String,
}

/// The user profile singleton (`profile.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub notes: Vec<ProfileNote>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Profile {
    /// Preferences every new profile starts with.
    pub const DEFAULT_PREFERENCES: [(&'static str, &'static str); 4] = [
        ("communication_style", "direct"),
        ("emoji_usage", "occasional"),
        ("technical_level", "advanced"),
        ("verbosity", "concise"),
    ];

    /// A fresh profile created at `now`.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        let stamp = format_timestamp(now);
        Self {
            name: None,
            preferences: Self::DEFAULT_PREFERENCES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            projects: Vec::new(),
            notes: Vec::new(),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

// ---- Sessions ----

/// Where an in-flight task stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckpointStatus {
    #[default]
    InProgress,
    Blocked,
    WaitingUser,
    Completed,
}

impl CheckpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointStatus::InProgress => "IN_PROGRESS",
            CheckpointStatus::Blocked => "BLOCKED",
            CheckpointStatus::WaitingUser => "WAITING_USER",
            CheckpointStatus::Completed => "COMPLETED",
        }
    }

    /// Parse a status a caller may set; `COMPLETED` is reserved for completion.
    pub fn parse_settable(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(CheckpointStatus::InProgress),
            "BLOCKED" => Some(CheckpointStatus::Blocked),
            "WAITING_USER" => Some(CheckpointStatus::WaitingUser),
            _ => None,
        }
    }
}

/// Snapshot of in-flight work (`sessions/active.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    pub timestamp: String,
    pub task: String,
    pub intent: String,
    #[serde(default)]
    pub status: CheckpointStatus,
    #[serde(default)]
    pub files_touched: Vec<String>,
    #[serde(default)]
    pub recent_actions: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub tool_call_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
