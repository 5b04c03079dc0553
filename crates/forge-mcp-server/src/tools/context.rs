// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::{ForgeMemory, full_context};
use serde_json::{Value, json};

use super::optional_str;
use crate::tool::{Tool, ToolOutput};

pub struct FullContextRecallTool {
    memory: Arc<ForgeMemory>,
}

impl FullContextRecallTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for FullContextRecallTool {
    fn name(&self) -> &str {
        "full_context_recall"
    }

    fn description(&self) -> &str {
        "Get everything at once: profile, recent sessions, decisions and dead ends. \
         Use when starting fresh."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project": {
                    "type": "string",
                    "description": "Only include decisions and dead ends whose project contains this text"
                }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let project = optional_str(&input, "project")?;
        ToolOutput::json(&full_context(&self.memory, project.as_deref(), Utc::now()))
    }
}
