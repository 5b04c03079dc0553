// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::journal::DEFAULT_RECALL;
use forge_memory::{ForgeMemory, NewJournalEntry};
use serde_json::{Value, json};

use super::{optional_str, optional_usize, required_str, string_list};
use crate::tool::{Tool, ToolOutput};

pub struct JournalEntryTool {
    memory: Arc<ForgeMemory>,
}

impl JournalEntryTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for JournalEntryTool {
    fn name(&self) -> &str {
        "journal_entry"
    }

    fn description(&self) -> &str {
        "Record a journal entry capturing how the session went, not just the task. \
         Call at the end of meaningful sessions."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "summary": { "type": "string", "description": "What happened this session" },
                "key_moments": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Significant moments"
                },
                "emotional_context": { "type": "string", "description": "How the session felt" },
                "breakthroughs": {
                    "type": "array", "items": { "type": "string" },
                    "description": "What clicked"
                },
                "frustrations": {
                    "type": "array", "items": { "type": "string" },
                    "description": "What was difficult"
                },
                "collaboration_notes": {
                    "type": "string",
                    "description": "Observations about working together"
                }
            },
            "required": ["summary"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let new = NewJournalEntry {
            summary: required_str(&input, "summary")?,
            key_moments: string_list(&input, "key_moments")?,
            emotional_context: optional_str(&input, "emotional_context")?,
            breakthroughs: string_list(&input, "breakthroughs")?,
            frustrations: string_list(&input, "frustrations")?,
            collaboration_notes: optional_str(&input, "collaboration_notes")?,
        };
        ToolOutput::json(&self.memory.journal.record(new, Utc::now())?)
    }
}

pub struct JournalRecallTool {
    memory: Arc<ForgeMemory>,
}

impl JournalRecallTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for JournalRecallTool {
    fn name(&self) -> &str {
        "journal_recall"
    }

    fn description(&self) -> &str {
        "Retrieve the most recent session journals. Call at the start of a session."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sessions_count": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "How many recent sessions to retrieve (default 3)"
                }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let count = optional_usize(&input, "sessions_count")?.unwrap_or(DEFAULT_RECALL);
        ToolOutput::json(&self.memory.journal.recall(count))
    }
}
