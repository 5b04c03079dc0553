// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Session Forge integration tests.
//!
//! [`TestHarness`] wires a temporary data directory, the memory stores and the
//! MCP request handler together so tests can drive tools through JSON-RPC.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
