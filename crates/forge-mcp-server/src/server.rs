// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP request handling over a [`ToolRegistry`].
//!
//! Transport-agnostic: [`McpServer::handle_line`] takes one raw JSON-RPC
//! message and returns the response to write, if any.

use forge_core::ForgeError;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::jsonrpc::{
    self, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tool::{ToolOutput, ToolRegistry};

pub const SERVER_NAME: &str = "session-forge";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Protocol version answered when the client does not state one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw message. Parse failures answer with a null id.
    pub async fn handle_line(&self, raw: &str) -> Option<Value> {
        let data: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparsable request");
                return Some(jsonrpc::error(None, PARSE_ERROR, &format!("Parse error: {e}")));
            }
        };

        let Some(obj) = data.as_object() else {
            return Some(jsonrpc::error(None, INVALID_REQUEST, "Invalid Request"));
        };
        let id = obj.get("id").cloned();
        if !obj.contains_key("method") {
            return Some(jsonrpc::error(id, INVALID_REQUEST, "Invalid Request"));
        }

        match serde_json::from_value::<JsonRpcRequest>(data) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(jsonrpc::error(
                id,
                INVALID_REQUEST,
                &format!("Invalid Request: {e}"),
            )),
        }
    }

    /// Handle a decoded request. Notifications never get a reply.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<Value> {
        let notification = request.is_notification();
        debug!(method = %request.method, notification, "request");

        let reply = match request.method.as_str() {
            "initialize" => {
                let protocol_version = request
                    .params
                    .as_ref()
                    .and_then(|p| p.get("protocolVersion"))
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);
                info!(protocol_version, "client initialized");
                jsonrpc::response(
                    request.id,
                    json!({
                        "protocolVersion": protocol_version,
                        "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
                        "capabilities": { "tools": {} }
                    }),
                )
            }
            "notifications/initialized" | "initialized" => return None,
            "ping" => jsonrpc::response(request.id, json!({})),
            "resources/list" => jsonrpc::response(request.id, json!({ "resources": [] })),
            "prompts/list" => jsonrpc::response(request.id, json!({ "prompts": [] })),
            "tools/list" => jsonrpc::response(
                request.id,
                json!({ "tools": self.registry.tool_definitions() }),
            ),
            "tools/call" => self.call_tool(request.id, request.params).await,
            method => {
                if notification {
                    return None;
                }
                jsonrpc::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {method}"),
                )
            }
        };

        if notification { None } else { Some(reply) }
    }

    async fn call_tool(&self, id: Option<Value>, params: Option<Value>) -> Value {
        let Some(Value::Object(params)) = params else {
            return jsonrpc::error(id, INVALID_PARAMS, "params must be an object");
        };
        let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
        let Some(tool) = self.registry.get(name) else {
            return jsonrpc::error(id, INVALID_PARAMS, &format!("Unknown tool: {name}"));
        };
        let args = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(v) => v.clone(),
        };

        let output = match validate_arguments(&tool.parameters_schema(), &args) {
            Ok(()) => tool.invoke(args).await,
            Err(e) => Err(e),
        };
        let output = output.unwrap_or_else(|e| {
            warn!(tool = name, error = %e, "tool call failed");
            ToolOutput::from_error(&e)
        });

        jsonrpc::response(
            id,
            json!({
                "content": [{ "type": "text", "text": output.content }],
                "isError": output.is_error,
            }),
        )
    }
}

/// Check `args` against a tool's JSON Schema.
fn validate_arguments(schema: &Value, args: &Value) -> Result<(), ForgeError> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| ForgeError::Internal(format!("invalid tool schema: {e}")))?;
    let problems: Vec<String> = validator.iter_errors(args).map(|e| e.to_string()).collect();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ForgeError::InvalidInput(problems.join("; ")))
    }
}
