// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `forge serve` command implementation.

use std::sync::Arc;

use forge_config::ForgeConfig;
use forge_core::ForgeError;
use forge_mcp_server::{McpServer, ToolRegistry, register_all, run_stdio};
use forge_memory::ForgeMemory;
use forge_storage::StorePaths;
use tracing::info;

/// Run the MCP server on stdin/stdout until the client disconnects.
pub async fn run_serve(config: ForgeConfig) -> Result<(), ForgeError> {
    init_tracing(&config.agent.log_level);
    forge_storage::telemetry::register_metrics();

    let paths = StorePaths::resolve(&config.storage)?;
    info!(base = %paths.base.display(), "data directory resolved");

    let memory = Arc::new(ForgeMemory::open(paths));
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, memory, &config.session);
    info!(tools = registry.len(), "tools registered");

    let server = McpServer::new(registry);
    run_stdio(&server).await
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries the protocol.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("forge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
