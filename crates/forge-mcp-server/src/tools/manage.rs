// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forge_core::ForgeError;
use forge_memory::manage::{self, DEFAULT_PRUNE_DAYS};
use forge_memory::{ForgeMemory, StoreSelector};
use serde_json::{Value, json};
use strum::EnumString;

use super::{optional_str, optional_usize, required_str};
use crate::tool::{Tool, ToolOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
enum Action {
    Prune,
    Export,
    Clear,
    Stats,
}

pub struct DataManageTool {
    memory: Arc<ForgeMemory>,
}

impl DataManageTool {
    pub fn new(memory: Arc<ForgeMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for DataManageTool {
    fn name(&self) -> &str {
        "data_manage"
    }

    fn description(&self) -> &str {
        "Manage stored data. Actions: prune (remove entries older than N days), \
         export (dump everything as JSON), clear (wipe a store), stats (counts and file sizes)"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["prune", "export", "clear", "stats"],
                    "description": "Action to perform"
                },
                "store": {
                    "type": "string",
                    "enum": StoreSelector::NAMES,
                    "description": "Which store to act on (default: all)"
                },
                "days": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": u32::MAX,
                    "description": "For prune: remove entries older than this many days (default 90)"
                }
            },
            "required": ["action"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError> {
        let action_name = required_str(&input, "action")?;
        let action: Action = action_name
            .parse()
            .map_err(|_| ForgeError::InvalidInput(format!("unknown action '{action_name}'")))?;
        let store = match optional_str(&input, "store")? {
            Some(name) => name.parse::<StoreSelector>().map_err(|_| {
                ForgeError::InvalidInput(format!(
                    "unknown store '{name}', expected one of: {}",
                    StoreSelector::NAMES.join(", ")
                ))
            })?,
            None => StoreSelector::All,
        };
        let now = Utc::now();

        match action {
            Action::Stats => ToolOutput::json(&manage::stats(&self.memory)?),
            Action::Export => ToolOutput::json(&manage::export(&self.memory, now)),
            Action::Prune => {
                let days = match optional_usize(&input, "days")? {
                    Some(days) => u32::try_from(days)
                        .map_err(|_| ForgeError::InvalidInput("'days' is too large".into()))?,
                    None => DEFAULT_PRUNE_DAYS,
                };
                let results = manage::prune(&self.memory, store, days, now)?;
                ToolOutput::json(&json!({
                    "action": "prune",
                    "cutoff_days": days,
                    "results": results,
                }))
            }
            Action::Clear => {
                let cleared = manage::clear(&self.memory, store, now)?;
                let message = if store == StoreSelector::All {
                    "All stores cleared. Profile was NOT cleared (use store='profile' explicitly)."
                        .to_string()
                } else {
                    format!("{store} store cleared.")
                };
                ToolOutput::json(&json!({
                    "action": "clear",
                    "cleared": cleared,
                    "message": message,
                }))
            }
        }
    }
}
