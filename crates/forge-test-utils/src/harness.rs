// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! Each harness owns a fresh temp directory, so harnesses are independent and
//! can run in parallel.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use forge_config::model::{ForgeConfig, SessionConfig};
use forge_core::ForgeError;
use forge_mcp_server::{McpServer, ToolRegistry, register_all};
use forge_memory::ForgeMemory;
use forge_storage::StorePaths;
use serde_json::{Value, json};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    session: SessionConfig,
    files: Vec<(String, String)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            session: SessionConfig::default(),
            files: Vec::new(),
        }
    }

    /// Set the age after which an active session counts as stale.
    pub fn with_stale_hours(mut self, hours: f64) -> Self {
        self.session.stale_hours = hours;
        self
    }

    /// Set the default number of archived sessions `session_history` returns.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.session.history_limit = limit;
        self
    }

    /// Seed a file (relative to the data directory) before the stores open.
    pub fn with_file(mut self, relative: &str, contents: &str) -> Self {
        self.files.push((relative.to_string(), contents.to_string()));
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub fn build(self) -> Result<TestHarness, ForgeError> {
        let temp_dir = tempfile::TempDir::new().map_err(ForgeError::storage)?;

        for (relative, contents) in &self.files {
            let path = temp_dir.path().join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(ForgeError::storage)?;
            }
            std::fs::write(&path, contents).map_err(ForgeError::storage)?;
        }

        let mut config = ForgeConfig::default();
        config.storage.base_dir = Some(temp_dir.path().to_string_lossy().into_owned());
        config.session = self.session;

        let paths = StorePaths::resolve(&config.storage)?;
        let memory = Arc::new(ForgeMemory::open(paths));

        let mut registry = ToolRegistry::new();
        register_all(&mut registry, Arc::clone(&memory), &config.session);
        tracing::debug!(tools = registry.len(), "test harness ready");

        Ok(TestHarness {
            config,
            memory,
            server: McpServer::new(registry),
            next_id: AtomicU64::new(1),
            _temp_dir: temp_dir,
        })
    }
}

/// A fully wired Session Forge instance backed by a temp directory.
pub struct TestHarness {
    pub config: ForgeConfig,
    pub memory: Arc<ForgeMemory>,
    pub server: McpServer,
    next_id: AtomicU64,
    // Keeps the data directory alive for the harness lifetime.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Root of the data directory.
    pub fn data_dir(&self) -> &Path {
        self.memory.paths().base.as_path()
    }

    /// Send one raw JSON-RPC line and return the reply, if any.
    pub async fn request(&self, line: &str) -> Option<Value> {
        self.server.handle_line(line).await
    }

    /// Call a tool and return the full `tools/call` result object.
    pub async fn call_raw(&self, name: &str, arguments: Value) -> Value {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        match self.server.handle_line(&request.to_string()).await {
            Some(reply) => reply.get("result").cloned().unwrap_or(reply),
            None => Value::Null,
        }
    }

    /// Call a tool and decode the JSON payload of its first text block.
    ///
    /// Tool errors decode the same way, so callers see `{"error": ...}`.
    pub async fn call(&self, name: &str, arguments: Value) -> Value {
        let result = self.call_raw(name, arguments).await;
        result["content"][0]["text"]
            .as_str()
            .and_then(|text| serde_json::from_str(text).ok())
            .unwrap_or(result)
    }
}
