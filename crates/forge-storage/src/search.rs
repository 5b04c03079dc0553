// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text search over entry projections.
//!
//! A query is split into lower-cased terms; an entry matches when its
//! projected text contains any term as a substring. There is no scoring:
//! matches keep collection order (oldest first) and the most recent `limit`
//! are returned. A query without usable terms degrades to "most recent".

/// Default result cap for the search tools.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Lower-case `query`, split on whitespace and drop single-character terms.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|term| term.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// The last `limit` entries, in order.
pub fn recent<E>(entries: &[E], limit: usize) -> &[E] {
    &entries[entries.len().saturating_sub(limit)..]
}

/// Whether `text` contains any of `terms` (terms are already lower-cased).
pub fn matches_any(text: &str, terms: &[String]) -> bool {
    let text = text.to_lowercase();
    terms.iter().any(|term| text.contains(term.as_str()))
}

/// Search `entries` for `query` against `project(entry)`, keeping at most
/// the `limit` most recent matches.
pub fn search<'a, E, F>(entries: &'a [E], query: &str, project: F, limit: usize) -> Vec<&'a E>
where
    F: Fn(&E) -> String,
{
    let terms = tokenize(query);
    if terms.is_empty() {
        return recent(entries, limit).iter().collect();
    }

    let mut matched: Vec<&E> = entries
        .iter()
        .filter(|entry| matches_any(&project(*entry), &terms))
        .collect();
    let start = matched.len().saturating_sub(limit);
    matched.split_off(start)
}
