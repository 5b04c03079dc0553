// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Housekeeping across every store: stats, export, prune and clear.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use forge_core::{ForgeError, format_timestamp};
use forge_storage::{CollectionDocument, CollectionStore, PruneOutcome, recovered_count};
use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};
use tracing::info;

use crate::stores::ForgeMemory;
use crate::types::{DeadEndEntry, DecisionEntry, JournalEntry, Profile};

/// Default age for [`prune`].
pub const DEFAULT_PRUNE_DAYS: u32 = 90;

/// Which store a management action targets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoreSelector {
    Journal,
    Decisions,
    DeadEnds,
    Profile,
    #[default]
    All,
}

impl StoreSelector {
    pub const NAMES: [&'static str; 5] = ["journal", "decisions", "dead_ends", "profile", "all"];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    fn includes(self, other: StoreSelector) -> bool {
        self == StoreSelector::All || self == other
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub journal_entries: usize,
    pub decisions: usize,
    pub dead_ends: usize,
    pub has_active_session: bool,
    pub archived_sessions: usize,
    /// Per collection: the stamped version, or `"none"` for legacy files.
    pub schema_versions: BTreeMap<&'static str, Value>,
    /// Per file: size in bytes, absent files omitted.
    pub file_sizes: BTreeMap<&'static str, u64>,
    /// Loads this process recovered from unreadable documents.
    pub recovered_loads: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Export {
    pub exported_at: String,
    pub profile: Profile,
    pub journal: Vec<JournalEntry>,
    pub decisions: Vec<DecisionEntry>,
    pub dead_ends: Vec<DeadEndEntry>,
}

fn schema_version<D: CollectionDocument>(store: &CollectionStore<D>) -> Value {
    store
        .load()
        .schema_version()
        .map_or_else(|| Value::from("none"), Value::from)
}

pub fn stats(memory: &ForgeMemory) -> Result<Stats, ForgeError> {
    let paths = memory.paths();
    let files = [
        ("profile", &paths.profile),
        ("journal", &paths.journal),
        ("decisions", &paths.decisions),
        ("dead_ends", &paths.dead_ends),
        ("active_session", &paths.active_session),
    ];
    let file_sizes = files
        .into_iter()
        .filter_map(|(name, path)| std::fs::metadata(path).ok().map(|m| (name, m.len())))
        .collect();

    Ok(Stats {
        journal_entries: memory.journal.store().len(),
        decisions: memory.decisions.store().len(),
        dead_ends: memory.dead_ends.store().len(),
        has_active_session: memory.sessions.has_active(),
        archived_sessions: memory.sessions.archive_count()?,
        schema_versions: BTreeMap::from([
            ("journal", schema_version(memory.journal.store())),
            ("decisions", schema_version(memory.decisions.store())),
            ("dead_ends", schema_version(memory.dead_ends.store())),
        ]),
        file_sizes,
        recovered_loads: recovered_count(),
    })
}

pub fn export(memory: &ForgeMemory, now: DateTime<Utc>) -> Export {
    Export {
        exported_at: format_timestamp(now),
        profile: memory.profile.get(now),
        journal: memory.journal.store().entries(),
        decisions: memory.decisions.store().entries(),
        dead_ends: memory.dead_ends.store().entries(),
    }
}

/// `now - days`, clamped to the earliest representable instant.
fn prune_cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Drop entries older than `days`. The profile has nothing to prune.
pub fn prune(
    memory: &ForgeMemory,
    store: StoreSelector,
    days: u32,
    now: DateTime<Utc>,
) -> Result<BTreeMap<&'static str, PruneOutcome>, ForgeError> {
    let cutoff = prune_cutoff(now, days);
    let mut results = BTreeMap::new();

    if store.includes(StoreSelector::Journal) {
        results.insert("journal", memory.journal.store().prune_older_than(cutoff)?);
    }
    if store.includes(StoreSelector::Decisions) {
        results.insert("decisions", memory.decisions.store().prune_older_than(cutoff)?);
    }
    if store.includes(StoreSelector::DeadEnds) {
        results.insert("dead_ends", memory.dead_ends.store().prune_older_than(cutoff)?);
    }

    info!(store = %store, days, "prune finished");
    Ok(results)
}

/// Clear `store`. `All` clears the three collections but keeps the profile;
/// `Profile` resets it to the default for `now`.
pub fn clear(
    memory: &ForgeMemory,
    store: StoreSelector,
    now: DateTime<Utc>,
) -> Result<Vec<&'static str>, ForgeError> {
    let mut cleared = Vec::new();

    if store.includes(StoreSelector::Journal) {
        memory.journal.store().clear()?;
        cleared.push("journal");
    }
    if store.includes(StoreSelector::Decisions) {
        memory.decisions.store().clear()?;
        cleared.push("decisions");
    }
    if store.includes(StoreSelector::DeadEnds) {
        memory.dead_ends.store().clear()?;
        cleared.push("dead_ends");
    }
    if store == StoreSelector::Profile {
        memory.profile.reset(now)?;
        cleared.push("profile");
    }

    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dead_ends::NewDeadEnd;
    use crate::journal::NewJournalEntry;
    use crate::profile::ProfileUpdate;
    use crate::sessions::NewCheckpoint;
    use chrono::{Duration, TimeZone};
    use forge_storage::StorePaths;

    fn at(days: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(days)
    }

    fn open() -> (tempfile::TempDir, ForgeMemory) {
        let dir = tempfile::tempdir().unwrap();
        let memory = ForgeMemory::open(StorePaths::new(dir.path()));
        (dir, memory)
    }

    fn journal(summary: &str) -> NewJournalEntry {
        NewJournalEntry {
            summary: summary.into(),
            ..Default::default()
        }
    }

    fn dead_end(what: &str) -> NewDeadEnd {
        NewDeadEnd {
            attempted: what.into(),
            why_failed: "nope".into(),
            ..Default::default()
        }
    }

    #[test]
    fn selector_parses_known_names_only() {
        for name in StoreSelector::NAMES {
            assert_eq!(name.parse::<StoreSelector>().unwrap().as_str(), name);
        }
        assert!("sessions".parse::<StoreSelector>().is_err());
        assert_eq!(StoreSelector::default(), StoreSelector::All);
    }

    #[test]
    fn stats_on_fresh_store() {
        let (_dir, memory) = open();
        let stats = stats(&memory).unwrap();
        assert_eq!(stats.journal_entries, 0);
        assert!(!stats.has_active_session);
        assert_eq!(stats.archived_sessions, 0);
        assert_eq!(stats.schema_versions["journal"], "none");
        assert!(stats.file_sizes.is_empty());
    }

    #[test]
    fn stats_counts_entries_and_sessions() {
        let (_dir, memory) = open();
        memory.journal.record(journal("a"), at(0)).unwrap();
        memory.dead_ends.record(dead_end("x"), at(0)).unwrap();
        let checkpoint = NewCheckpoint {
            task: "t".into(),
            intent: "i".into(),
            ..Default::default()
        };
        memory.sessions.checkpoint(checkpoint, at(0)).unwrap();

        let stats = stats(&memory).unwrap();
        assert_eq!(stats.journal_entries, 1);
        assert_eq!(stats.dead_ends, 1);
        assert!(stats.has_active_session);
        assert_eq!(stats.schema_versions["journal"], 1);
        assert_eq!(stats.schema_versions["decisions"], "none");
        assert!(stats.file_sizes["journal"] > 0);
        assert!(stats.file_sizes.contains_key("active_session"));
    }

    #[test]
    fn export_collects_everything() {
        let (_dir, memory) = open();
        memory.journal.record(journal("a"), at(0)).unwrap();
        let exported = export(&memory, at(1));
        assert_eq!(exported.journal.len(), 1);
        assert!(exported.decisions.is_empty());
        assert_eq!(exported.exported_at, format_timestamp(at(1)));
        assert_eq!(exported.profile, Profile::default_at(at(1)));
    }

    #[test]
    fn prune_drops_entries_at_or_before_cutoff() {
        let (_dir, memory) = open();
        memory.journal.record(journal("ancient"), at(0)).unwrap();
        memory.journal.record(journal("boundary"), at(10)).unwrap();
        memory.journal.record(journal("fresh"), at(95)).unwrap();
        memory.dead_ends.record(dead_end("old"), at(0)).unwrap();

        let results = prune(&memory, StoreSelector::Journal, DEFAULT_PRUNE_DAYS, at(100)).unwrap();
        assert_eq!(results["journal"], PruneOutcome { before: 3, after: 1 });
        assert!(!results.contains_key("dead_ends"));
        assert_eq!(memory.dead_ends.store().len(), 1);

        let all = prune(&memory, StoreSelector::All, 90, at(100)).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all["dead_ends"], PruneOutcome { before: 1, after: 0 });
    }

    #[test]
    fn prune_profile_touches_nothing() {
        let (_dir, memory) = open();
        memory.journal.record(journal("ancient"), at(0)).unwrap();
        assert!(prune(&memory, StoreSelector::Profile, 1, at(100)).unwrap().is_empty());
        assert_eq!(memory.journal.store().len(), 1);
    }

    #[test]
    fn prune_with_out_of_range_days_keeps_everything() {
        let (_dir, memory) = open();
        memory.journal.record(journal("ancient"), at(0)).unwrap();
        memory.journal.record(journal("fresh"), at(95)).unwrap();

        for days in [200_000_000, u32::MAX] {
            let results = prune(&memory, StoreSelector::Journal, days, at(100)).unwrap();
            assert_eq!(results["journal"], PruneOutcome { before: 2, after: 2 });
        }
        assert_eq!(prune_cutoff(at(100), u32::MAX), DateTime::<Utc>::MIN_UTC);
        assert_eq!(prune_cutoff(at(100), 90), at(10));
    }

    #[test]
    fn clear_all_keeps_profile() {
        let (_dir, memory) = open();
        let update = ProfileUpdate {
            name: Some("Robin".into()),
            ..Default::default()
        };
        memory.profile.update(update, at(0)).unwrap();
        memory.journal.record(journal("a"), at(0)).unwrap();

        let cleared = clear(&memory, StoreSelector::All, at(1)).unwrap();
        assert_eq!(cleared, vec!["journal", "decisions", "dead_ends"]);
        assert_eq!(memory.journal.store().len(), 0);
        assert_eq!(memory.profile.get(at(1)).name.as_deref(), Some("Robin"));

        let cleared = clear(&memory, StoreSelector::Profile, at(2)).unwrap();
        assert_eq!(cleared, vec!["profile"]);
        assert!(memory.profile.get(at(3)).name.is_none());
    }
}
