// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end JSON-RPC sessions against the request handler.

use std::sync::Arc;

use forge_config::model::SessionConfig;
use forge_mcp_server::{McpServer, ToolRegistry, register_all};
use forge_memory::ForgeMemory;
use forge_storage::StorePaths;
use serde_json::{Value, json};

fn server() -> (tempfile::TempDir, McpServer) {
    let dir = tempfile::tempdir().unwrap();
    let memory = Arc::new(ForgeMemory::open(StorePaths::new(dir.path())));
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, memory, &SessionConfig::default());
    (dir, McpServer::new(registry))
}

async fn call(server: &McpServer, id: u64, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    });
    let reply = server.handle_line(&request.to_string()).await.unwrap();
    assert_eq!(reply["id"], id);
    reply["result"].clone()
}

fn payload(result: &Value) -> Value {
    serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap()
}

// ---- Test 1: initialize -> tools/list -> tools/call ----

#[tokio::test]
async fn initialize_list_call() {
    let (_dir, server) = server();

    let init = server
        .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#)
        .await
        .unwrap();
    assert_eq!(init["jsonrpc"], "2.0");
    assert_eq!(init["result"]["protocolVersion"], "2024-11-05");

    assert!(server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await
        .is_none());

    let list = server
        .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
        .await
        .unwrap();
    let tools = list["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 21);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

    let result = call(&server, 3, "profile_get", json!({})).await;
    assert_eq!(result["isError"], false);
    assert_eq!(payload(&result)["preferences"]["technical_level"], "advanced");
}

// ---- Test 2: record, list, delete, list over the wire ----

#[tokio::test]
async fn dead_end_list_delete_scenario() {
    let (_dir, server) = server();
    for (n, what) in ["tried X", "tried Y", "tried Z"].iter().enumerate() {
        let result = call(
            &server,
            10 + n as u64,
            "dead_end_record",
            json!({ "attempted": what, "why_failed": "did not work", "project": "forge" }),
        )
        .await;
        assert_eq!(result["isError"], false);
        // distinct millisecond timestamps
        tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    }

    let listed = payload(&call(&server, 20, "dead_end_list", json!({ "limit": 10 })).await);
    let previews: Vec<_> = listed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["preview"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(previews, vec!["tried X", "tried Y", "tried Z"]);

    let deleted = payload(&call(&server, 21, "dead_end_delete", json!({ "index": 2 })).await);
    assert_eq!(deleted["deleted"]["attempted"], "tried Y");
    assert_eq!(deleted["remaining"], 2);

    let listed = payload(&call(&server, 22, "dead_end_list", json!({})).await);
    assert_eq!(listed["items"][0]["preview"], "tried X");
    assert_eq!(listed["items"][1]["preview"], "tried Z");
    assert_eq!(listed["items"][1]["index"], 2);

    let searched = payload(&call(&server, 23, "dead_end_search", json!({ "query": "forge" })).await);
    assert_eq!(searched.as_array().unwrap().len(), 2);
}

// ---- Test 3: full context over the wire honours the project filter ----

#[tokio::test]
async fn full_context_project_filter() {
    let (_dir, server) = server();
    for (n, project) in ["alpha", "beta", "ALPHA-2", "beta"].iter().enumerate() {
        call(
            &server,
            n as u64,
            "decision_record",
            json!({ "choice": format!("choice {n}"), "reasoning": "r", "project": project }),
        )
        .await;
    }

    let context = payload(&call(&server, 9, "full_context_recall", json!({ "project": "alp" })).await);
    let projects: Vec<_> = context["recent_decisions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["project"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(projects, vec!["alpha", "ALPHA-2"]);
    assert!(context["retrieved_at"].is_string());
}

// ---- Test 4: schema violations come back as tool errors ----

#[tokio::test]
async fn wrong_argument_type_is_tool_error() {
    let (_dir, server) = server();
    let result = call(&server, 1, "journal_recall", json!({ "sessions_count": "three" })).await;
    assert_eq!(result["isError"], true);
    assert!(payload(&result)["error"].is_string());
}
