// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded collections and age-based pruning.
//!
//! Caps are fixed per collection type and applied on the write path only,
//! right after an append and before the document is persisted.

use chrono::{DateTime, Utc};
use forge_core::parse_timestamp;

/// Maximum retained journal sessions.
pub const JOURNAL_CAP: usize = 100;
/// Maximum retained decisions.
pub const DECISIONS_CAP: usize = 200;
/// Maximum retained dead ends.
pub const DEAD_ENDS_CAP: usize = 100;
/// Maximum retained profile notes.
pub const PROFILE_NOTES_CAP: usize = 50;

/// Keep only the last `cap` entries, preserving their order.
///
/// Returns the number of evicted entries.
pub fn enforce_cap<E>(entries: &mut Vec<E>, cap: usize) -> usize {
    let excess = entries.len().saturating_sub(cap);
    if excess > 0 {
        entries.drain(..excess);
    }
    excess
}

/// Append `entry` and evict the oldest entries beyond `cap`.
pub fn append_bounded<E>(entries: &mut Vec<E>, entry: E, cap: usize) -> usize {
    entries.push(entry);
    enforce_cap(entries, cap)
}

/// Drop every entry whose timestamp is not strictly after `cutoff`.
///
/// Entries with unparsable timestamps are dropped too. Returns the number removed.
pub fn prune_older_than<E, F>(entries: &mut Vec<E>, cutoff: DateTime<Utc>, timestamp: F) -> usize
where
    F: Fn(&E) -> &str,
{
    let before = entries.len();
    entries.retain(|e| parse_timestamp(timestamp(e)).is_some_and(|ts| ts > cutoff));
    before - entries.len()
}
