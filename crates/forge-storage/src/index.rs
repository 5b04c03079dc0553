// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The list view and delete-by-index protocol.
//!
//! A list call shows a 1-based enumeration of a collection; a later delete
//! call names an entry by its position in that enumeration. Nothing is held
//! between the two calls: delete rebuilds the view from the current document
//! and the same query, resolves the chosen position to a timestamp, and
//! removes the first entry in the full collection carrying that timestamp.
//!
//! Delete always rebuilds with fixed caps ([`RECENT_VIEW_CAP`] without a
//! query, [`QUERY_VIEW_CAP`] with one), regardless of the `limit` the caller
//! passed to the list call. Positions beyond [`RECENT_VIEW_CAP`] in an
//! unfiltered list therefore cannot be deleted by index.

use forge_core::ForgeError;
use serde::Serialize;
use tracing::warn;

use crate::collection::Entry;
use crate::search::{recent, search};

/// View size for a list or delete without a query.
pub const RECENT_VIEW_CAP: usize = 10;
/// View size for a list or delete with a query.
pub const QUERY_VIEW_CAP: usize = 200;
/// Maximum preview length in characters.
pub const PREVIEW_CHARS: usize = 80;

/// One row of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewItem {
    /// 1-based position in the view.
    pub index: usize,
    /// Identity of the underlying entry.
    pub timestamp: String,
    /// Entry summary, truncated to [`PREVIEW_CHARS`].
    pub preview: String,
}

/// Outcome of a successful delete-by-index.
#[derive(Debug, Clone, PartialEq)]
pub struct Deletion<E> {
    /// The entry that was removed.
    pub removed: E,
    /// Entries left in the collection.
    pub remaining: usize,
    /// Other entries that shared the removed entry's timestamp.
    pub collisions: usize,
}

/// A query counts as present only if it has non-whitespace content.
fn present(query: Option<&str>) -> Option<&str> {
    query.filter(|q| !q.trim().is_empty())
}

/// The entries a list or delete call enumerates, in display order.
pub fn view<'a, E: Entry>(entries: &'a [E], query: Option<&str>, limit: usize) -> Vec<&'a E> {
    match present(query) {
        Some(q) => search(entries, q, E::search_text, QUERY_VIEW_CAP),
        None => recent(entries, limit).iter().collect(),
    }
}

/// Truncate `text` to [`PREVIEW_CHARS`] characters, marking truncation with `...`.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Build the numbered view shown by a list call.
///
/// With a query, matches are capped at [`QUERY_VIEW_CAP`] and `limit` is
/// ignored; without one, the last `limit` entries are shown oldest first.
pub fn list_view<E: Entry>(entries: &[E], query: Option<&str>, limit: usize) -> Vec<ViewItem> {
    view(entries, query, limit)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| ViewItem {
            index: i + 1,
            timestamp: entry.timestamp().to_string(),
            preview: preview(&entry.summary()),
        })
        .collect()
}

/// Remove the entry shown at `index` in the view for `query`.
///
/// The caller persists `entries` afterwards; nothing is mutated on error.
pub fn delete_by_index<E: Entry>(
    entries: &mut Vec<E>,
    index: usize,
    query: Option<&str>,
) -> Result<Deletion<E>, ForgeError> {
    let target = {
        let shown = view(entries, query, RECENT_VIEW_CAP);
        if index == 0 || index > shown.len() {
            return Err(ForgeError::IndexOutOfRange {
                index,
                len: shown.len(),
            });
        }
        shown[index - 1].timestamp().to_string()
    };

    let mut positions = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.timestamp() == target)
        .map(|(pos, _)| pos);
    let first = positions
        .next()
        .ok_or_else(|| ForgeError::Internal(format!("entry {target} vanished from view")))?;
    let collisions = positions.count();

    if collisions > 0 {
        warn!(
            timestamp = %target,
            collisions,
            "several entries share this timestamp, removing the first"
        );
    }

    let removed = entries.remove(first);
    Ok(Deletion {
        removed,
        remaining: entries.len(),
        collisions,
    })
}
