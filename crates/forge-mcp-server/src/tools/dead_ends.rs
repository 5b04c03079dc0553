// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::{ForgeMemory, NewDeadEnd};
use serde_json::{Value, json};

use super::{optional_str, required_str, string_list};
use crate::tool::{Tool, ToolOutput};

pub struct DeadEndRecordTool {
    memory: Arc<ForgeMemory>,
}

impl DeadEndRecordTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for DeadEndRecordTool {
    fn name(&self) -> &str {
        "dead_end_record"
    }

    fn description(&self) -> &str {
        "Record a debugging dead end so it is not repeated: what was tried and why it failed"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "attempted": { "type": "string", "description": "What was tried" },
                "why_failed": { "type": "string", "description": "Why it didn't work" },
                "lesson": { "type": "string", "description": "What to remember next time" },
                "project": { "type": "string", "description": "Which project" },
                "files_involved": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Files involved"
                },
                "tags": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Tags for searching"
                }
            },
            "required": ["attempted", "why_failed"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let new = NewDeadEnd {
            attempted: required_str(&input, "attempted")?,
            why_failed: required_str(&input, "why_failed")?,
            lesson: optional_str(&input, "lesson")?,
            project: optional_str(&input, "project")?,
            files_involved: string_list(&input, "files_involved")?,
            tags: string_list(&input, "tags")?,
        };
        ToolOutput::json(&self.memory.dead_ends.record(new, Utc::now())?)
    }
}
