// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Session Forge tool surface.

pub mod collection;
pub mod context;
pub mod dead_ends;
pub mod decisions;
pub mod journal;
pub mod manage;
pub mod profile;
pub mod sessions;

use std::sync::Arc;

use forge_config::model::SessionConfig;
use forge_core::ForgeError;
use forge_memory::ForgeMemory;
use serde_json::Value;

use crate::tool::ToolRegistry;
use collection::{DeleteTool, ListTool, SearchTool};

/// Registers every Session Forge tool.
pub fn register_all(registry: &mut ToolRegistry, memory: Arc<ForgeMemory>, session: &SessionConfig) {
    registry.register(Arc::new(sessions::SessionCheckpointTool::new(memory.clone())));
    registry.register(Arc::new(sessions::SessionRestoreTool::new(
        memory.clone(),
        session.stale_hours,
    )));
    registry.register(Arc::new(sessions::SessionCompleteTool::new(memory.clone())));
    registry.register(Arc::new(sessions::SessionHistoryTool::new(
        memory.clone(),
        session.history_limit,
    )));

    registry.register(Arc::new(profile::ProfileGetTool::new(memory.clone())));
    registry.register(Arc::new(profile::ProfileUpdateTool::new(memory.clone())));

    registry.register(Arc::new(journal::JournalEntryTool::new(memory.clone())));
    registry.register(Arc::new(journal::JournalRecallTool::new(memory.clone())));
    registry.register(Arc::new(SearchTool::new(
        "journal_search",
        "Search past session journals by keyword",
        memory.journal.store().clone(),
    )));
    registry.register(Arc::new(ListTool::new(
        "journal_list",
        "List recent journal entries with 1-based indices for journal_delete",
        memory.journal.store().clone(),
    )));
    registry.register(Arc::new(DeleteTool::new(
        "journal_delete",
        "Delete a journal entry by its index from journal_list (pass the same query)",
        memory.journal.store().clone(),
    )));

    registry.register(Arc::new(decisions::DecisionRecordTool::new(memory.clone())));
    registry.register(Arc::new(SearchTool::new(
        "decision_search",
        "Search past decisions by keyword, project or tag",
        memory.decisions.store().clone(),
    )));
    registry.register(Arc::new(ListTool::new(
        "decision_list",
        "List recent decisions with 1-based indices for decision_delete",
        memory.decisions.store().clone(),
    )));
    registry.register(Arc::new(DeleteTool::new(
        "decision_delete",
        "Delete a decision by its index from decision_list (pass the same query)",
        memory.decisions.store().clone(),
    )));

    registry.register(Arc::new(dead_ends::DeadEndRecordTool::new(memory.clone())));
    registry.register(Arc::new(SearchTool::new(
        "dead_end_search",
        "Search past dead ends to avoid repeating mistakes",
        memory.dead_ends.store().clone(),
    )));
    registry.register(Arc::new(ListTool::new(
        "dead_end_list",
        "List recent dead ends with 1-based indices for dead_end_delete",
        memory.dead_ends.store().clone(),
    )));
    registry.register(Arc::new(DeleteTool::new(
        "dead_end_delete",
        "Delete a dead end by its index from dead_end_list (pass the same query)",
        memory.dead_ends.store().clone(),
    )));

    registry.register(Arc::new(context::FullContextRecallTool::new(memory.clone())));
    registry.register(Arc::new(manage::DataManageTool::new(memory)));
}

// ---- argument helpers ----

fn missing(key: &str) -> ForgeError {
    ForgeError::InvalidInput(format!("missing required '{key}' parameter"))
}

fn wrong_type(key: &str, expected: &str) -> ForgeError {
    ForgeError::InvalidInput(format!("parameter '{key}' must be {expected}"))
}

/// A required string argument.
pub(crate) fn required_str(input: &Value, key: &str) -> Result<String, ForgeError> {
    optional_str(input, key)?.ok_or_else(|| missing(key))
}

/// A string argument; absent and `null` both read as `None`.
pub(crate) fn optional_str(input: &Value, key: &str) -> Result<Option<String>, ForgeError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(key, "a string")),
    }
}

/// A string-array argument; absent reads as empty.
pub(crate) fn string_list(input: &Value, key: &str) -> Result<Vec<String>, ForgeError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| wrong_type(key, "an array of strings"))
            })
            .collect(),
        Some(_) => Err(wrong_type(key, "an array of strings")),
    }
}

/// A non-negative integer argument.
pub(crate) fn optional_usize(input: &Value, key: &str) -> Result<Option<usize>, ForgeError> {
    match input.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| wrong_type(key, "a non-negative integer")),
    }
}
