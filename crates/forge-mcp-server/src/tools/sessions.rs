// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session checkpoint tools: checkpoint, restore, complete, history.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::{CheckpointStatus, ForgeMemory, NewCheckpoint, Restore};
use serde_json::{Value, json};

use super::{optional_str, optional_usize, required_str, string_list};
use crate::tool::{Tool, ToolOutput};

pub struct SessionCheckpointTool {
    memory: Arc<ForgeMemory>,
}

impl SessionCheckpointTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for SessionCheckpointTool {
    fn name(&self) -> &str {
        "session_checkpoint"
    }

    fn description(&self) -> &str {
        "Save the current session state so an interrupted session can resume. \
         Call every few tool calls. Required: task, intent, next_steps"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task": { "type": "string", "description": "Brief task name" },
                "intent": { "type": "string", "description": "What you are trying to accomplish" },
                "next_steps": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Planned next steps"
                },
                "status": {
                    "type": "string",
                    "enum": ["IN_PROGRESS", "BLOCKED", "WAITING_USER"],
                    "description": "Current status (default IN_PROGRESS)"
                },
                "files_touched": {
                    "type": "array", "items": { "type": "string" },
                    "description": "File paths modified"
                },
                "recent_actions": {
                    "type": "array", "items": { "type": "string" },
                    "description": "Last few actions"
                },
                "context": { "type": "object", "description": "Any important state" },
                "tool_call_count": {
                    "type": "integer", "minimum": 0,
                    "description": "Approximate tool calls so far"
                }
            },
            "required": ["task", "intent", "next_steps"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let status = optional_str(&input, "status")?
            .map(|s| {
                CheckpointStatus::parse_settable(&s).ok_or_else(|| {
                    ForgeError::InvalidInput(format!(
                        "invalid status '{s}', expected IN_PROGRESS, BLOCKED or WAITING_USER"
                    ))
                })
            })
            .transpose()?;
        if input.get("next_steps").is_none_or(Value::is_null) {
            return Err(ForgeError::InvalidInput(
                "missing required 'next_steps' parameter".into(),
            ));
        }
        let context = match input.get("context") {
            None | Some(Value::Null) => serde_json::Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(ForgeError::InvalidInput(
                    "parameter 'context' must be an object".into(),
                ));
            }
        };

        let new = NewCheckpoint {
            task: required_str(&input, "task")?,
            intent: required_str(&input, "intent")?,
            next_steps: string_list(&input, "next_steps")?,
            status,
            files_touched: string_list(&input, "files_touched")?,
            recent_actions: string_list(&input, "recent_actions")?,
            context,
            tool_call_count: optional_usize(&input, "tool_call_count")?.unwrap_or(0) as u64,
        };
        let checkpoint = self.memory.sessions.checkpoint(new, Utc::now())?;

        ToolOutput::json(&json!({
            "success": true,
            "message": format!("Checkpoint saved at {}", checkpoint.timestamp),
            "checkpoint_id": checkpoint.timestamp,
        }))
    }
}

pub struct SessionRestoreTool {
    memory: Arc<ForgeMemory>,
    stale_hours: f64,
}

impl SessionRestoreTool {
    pub fn new(memory: Arc<ForgeMemory>, stale_hours: f64) -> Self {
        Self {
            memory,
            stale_hours,
        }
    }
}

#[async_trait]
impl Tool for SessionRestoreTool {
    fn name(&self) -> &str {
        "session_restore"
    }

    fn description(&self) -> &str {
        "Check for interrupted work from a previous session. Call this first in any session."
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn invoke(&self, _input: Value) -> Result<ToolOutput, ForgeError> {
        let body = match self.memory.sessions.restore(Utc::now(), self.stale_hours)? {
            Restore::NoSession => json!({
                "has_active_session": false,
                "message": "No active session found. Starting fresh.",
            }),
            Restore::Stale {
                checkpoint,
                age_hours,
            } => {
                let age = age_hours.map(f64::round);
                let ago = age.map_or_else(|| "unknown age".to_string(), |h| format!("{h}h ago"));
                json!({
                    "has_active_session": false,
                    "archived": true,
                    "age_hours": age,
                    "message": format!(
                        "Found stale session from {} ({ago}). Archived it. Starting fresh.",
                        checkpoint.timestamp
                    ),
                })
            }
            Restore::Active {
                checkpoint,
                age_minutes,
            } => {
                let message = format!(
                    "Found active session: \"{}\" ({age_minutes}m ago, {} tool calls)",
                    checkpoint.task, checkpoint.tool_call_count
                );
                let mut body = serde_json::to_value(&checkpoint)?;
                if let Value::Object(map) = &mut body {
                    map.insert("has_active_session".into(), Value::Bool(true));
                    map.insert("age_minutes".into(), json!(age_minutes));
                    map.insert("message".into(), Value::String(message));
                }
                body
            }
        };
        ToolOutput::json(&body)
    }
}

pub struct SessionCompleteTool {
    memory: Arc<ForgeMemory>,
}

impl SessionCompleteTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for SessionCompleteTool {
    fn name(&self) -> &str {
        "session_complete"
    }

    fn description(&self) -> &str {
        "Mark the current session as complete and archive its checkpoint"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "Brief summary of what was accomplished"
                }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let summary = optional_str(&input, "summary")?;
        let body = match self.memory.sessions.complete(summary, Utc::now())? {
            None => json!({
                "success": false,
                "message": "No active checkpoint to complete",
            }),
            Some(checkpoint) => json!({
                "success": true,
                "message": format!("Session completed and archived: \"{}\"", checkpoint.task),
            }),
        };
        ToolOutput::json(&body)
    }
}

pub struct SessionHistoryTool {
    memory: Arc<ForgeMemory>,
    default_limit: usize,
}

impl SessionHistoryTool {
    pub fn new(memory: Arc<ForgeMemory>, default_limit: usize) -> Self {
        Self {
            memory,
            default_limit,
        }
    }
}

#[async_trait]
impl Tool for SessionHistoryTool {
    fn name(&self) -> &str {
        "session_history"
    }

    fn description(&self) -> &str {
        "List archived (completed or stale) session checkpoints, oldest first"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "How many recent archives to return"
                }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let limit = optional_usize(&input, "limit")?.unwrap_or(self.default_limit);
        let sessions = self.memory.sessions.history(limit)?;
        ToolOutput::json(&json!({
            "count": sessions.len(),
            "sessions": sessions,
        }))
    }
}
