// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Session Forge workspace.
//!
//! Provides the shared error type and the timestamp format used as the
//! identity of every stored entry.

pub mod error;
pub mod time;

pub use error::ForgeError;
pub use time::{format_timestamp, now_timestamp, parse_timestamp};
