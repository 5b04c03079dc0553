// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait and registry.
//!
//! Every MCP tool implements [`Tool`]; the [`ToolRegistry`] indexes them by
//! name and renders the `tools/list` definitions.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use forge_core::ForgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Output from a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Pretty-printed JSON payload.
    pub content: String,
    /// Whether the invocation failed.
    pub is_error: bool,
}

impl ToolOutput {
    /// A successful result carrying `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ForgeError> {
        Ok(Self {
            content: serde_json::to_string_pretty(value)?,
            is_error: false,
        })
    }

    /// An error result for `err`. Out-of-range deletes include `valid_range`.
    pub fn from_error(err: &ForgeError) -> Self {
        let mut body = json!({ "error": err.to_string() });
        if let Some(range) = err.valid_range() {
            body["valid_range"] = Value::String(range);
        }
        Self {
            content: serde_json::to_string_pretty(&body).unwrap_or_else(|_| err.to_string()),
            is_error: true,
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, used for lookup and in `tools/list`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. Errors are rendered as error results by the caller.
    async fn invoke(&self, input: Value) -> Result<ToolOutput, ForgeError>;
}

/// Tools keyed by name. Iteration order is the `tools/list` order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tool`, replacing any tool already registered under its name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "tool registered twice; keeping the newer one");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(Arc::clone)
    }

    /// Registered tool names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// `tools/list` entries: `{ "name", "description", "inputSchema" }`.
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|(name, tool)| {
                json!({
                    "name": name,
                    "description": tool.description(),
                    "inputSchema": tool.parameters_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
