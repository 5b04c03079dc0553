// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::{ForgeMemory, ProfileUpdate};
use serde_json::{Value, json};

use super::optional_str;
use crate::tool::{Tool, ToolOutput};

pub struct ProfileGetTool {
    memory: Arc<ForgeMemory>,
}

impl ProfileGetTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for ProfileGetTool {
    fn name(&self) -> &str {
        "profile_get"
    }

    fn description(&self) -> &str {
        "Get the current user profile"
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn invoke(&self, _input: Value) -> Result<ToolOutput, ForgeError> {
        ToolOutput::json(&self.memory.profile.get(Utc::now()))
    }
}

pub struct ProfileUpdateTool {
    memory: Arc<ForgeMemory>,
}

impl ProfileUpdateTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

fn preferences(input: &Value) -> Result<Option<BTreeMap<String, String>>, ForgeError> {
    match input.get("preferences") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                _ => Err(ForgeError::InvalidInput(format!(
                    "preference '{k}' must be a string"
                ))),
            })
            .collect::<Result<_, _>>()
            .map(Some),
        Some(_) => Err(ForgeError::InvalidInput(
            "parameter 'preferences' must be an object".into(),
        )),
    }
}

#[async_trait]
impl Tool for ProfileUpdateTool {
    fn name(&self) -> &str {
        "profile_update"
    }

    fn description(&self) -> &str {
        "Update the user profile with a name, preferences, a project or a note. \
         Call when learning something about the user."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "User's name if learned" },
                "preferences": {
                    "type": "object",
                    "additionalProperties": { "type": "string" },
                    "description": "Preferences such as communication_style, emoji_usage, technical_level, verbosity"
                },
                "add_project": { "type": "string", "description": "Project to add to the user's list" },
                "add_note": { "type": "string", "description": "Observation about the user" }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let update = ProfileUpdate {
            name: optional_str(&input, "name")?,
            preferences: preferences(&input)?,
            add_project: optional_str(&input, "add_project")?,
            add_note: optional_str(&input, "add_note")?,
        };
        ToolOutput::json(&self.memory.profile.update(update, Utc::now())?)
    }
}
