// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP server for Session Forge.
//!
//! - [`tool`]: the `Tool` trait and `ToolRegistry`
//! - [`tools`]: one tool per memory operation, registered by [`register_all`]
//! - [`server`]: JSON-RPC dispatch (`initialize`, `tools/list`, `tools/call`, ...)
//! - [`stdio`]: the newline-delimited stdin/stdout transport

pub mod jsonrpc;
pub mod server;
pub mod stdio;
pub mod tool;
pub mod tools;

pub use server::McpServer;
pub use stdio::run_stdio;
pub use tool::{Tool, ToolOutput, ToolRegistry};
pub use tools::register_all;
