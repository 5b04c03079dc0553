// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::{ForgeMemory, NewDecision};
use serde_json::{Value, json};

use super::{optional_str, required_str, string_list};
use crate::tool::{Tool, ToolOutput};

pub struct DecisionRecordTool {
    memory: Arc<ForgeMemory>,
}

impl DecisionRecordTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for DecisionRecordTool {
    fn name(&self) -> &str {
        "decision_record"
    }

    fn description(&self) -> &str {
        "Record an architectural or technical decision with its reasoning and alternatives"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "choice": { "type": "string", "description": "What was decided" },
                "reasoning": { "type": "string", "description": "Why" },
                "alternatives": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Options that were considered"
                },
                "outcome": { "type": "string", "description": "How it turned out, if known" },
                "project": { "type": "string", "description": "Which project" },
                "tags": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Tags for searching"
                }
            },
            "required": ["choice", "reasoning"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let new = NewDecision {
            choice: required_str(&input, "choice")?,
            alternatives: string_list(&input, "alternatives")?,
            reasoning: required_str(&input, "reasoning")?,
            outcome: optional_str(&input, "outcome")?,
            project: optional_str(&input, "project")?,
            tags: string_list(&input, "tags")?,
        };
        ToolOutput::json(&self.memory.decisions.record(new, Utc::now())?)
    }
}
