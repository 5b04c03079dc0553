// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only "everything at once" view for the start of a session.

use chrono::{DateTime, Utc};
use forge_core::format_timestamp;
use serde::Serialize;
use tracing::debug;

use crate::stores::ForgeMemory;
use crate::types::{DeadEndEntry, DecisionEntry, JournalEntry, Profile};

pub const CONTEXT_SESSIONS: usize = 3;
pub const CONTEXT_DECISIONS: usize = 10;
pub const CONTEXT_DEAD_ENDS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct FullContext {
    pub user_profile: Profile,
    pub recent_sessions: Vec<JournalEntry>,
    pub recent_decisions: Vec<DecisionEntry>,
    pub recent_dead_ends: Vec<DeadEndEntry>,
    pub retrieved_at: String,
}

/// Case-insensitive substring match on a project label. Unlabelled entries never match.
fn in_project(label: Option<&str>, filter: &str) -> bool {
    label.is_some_and(|label| label.to_lowercase().contains(filter))
}

/// Keep the last `count` items.
fn tail<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    let start = items.len().saturating_sub(count);
    items.split_off(start)
}

/// Gather the profile, the last 3 journal sessions and the last 10 decisions
/// and dead ends. With `project`, the last 10 decisions and dead ends are
/// then narrowed to that project.
pub fn full_context(memory: &ForgeMemory, project: Option<&str>, now: DateTime<Utc>) -> FullContext {
    let filter = project
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_lowercase);

    let mut decisions = tail(memory.decisions.store().entries(), CONTEXT_DECISIONS);
    let mut dead_ends = tail(memory.dead_ends.store().entries(), CONTEXT_DEAD_ENDS);
    if let Some(filter) = &filter {
        decisions.retain(|d| in_project(d.project.as_deref(), filter));
        dead_ends.retain(|d| in_project(d.project.as_deref(), filter));
    }

    let context = FullContext {
        user_profile: memory.profile.get(now),
        recent_sessions: memory.journal.recall(CONTEXT_SESSIONS),
        recent_decisions: decisions,
        recent_dead_ends: dead_ends,
        retrieved_at: format_timestamp(now),
    };
    debug!(
        project = filter.as_deref(),
        sessions = context.recent_sessions.len(),
        decisions = context.recent_decisions.len(),
        dead_ends = context.recent_dead_ends.len(),
        "full context assembled"
    );
    context
}
