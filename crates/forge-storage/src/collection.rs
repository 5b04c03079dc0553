// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry and document traits, and the per-file collection store.
//!
//! [`CollectionStore`] owns nothing but a path: every call re-reads the
//! document, mutates a copy and writes it back, so no state survives between
//! requests.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use forge_core::ForgeError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::index::{self, Deletion, ViewItem};
use crate::{json_store, retention, search, telemetry};

/// Version stamped on every collection document at write time.
pub const SCHEMA_VERSION: u32 = 1;

/// A timestamped record inside a collection.
pub trait Entry: Clone + Serialize + DeserializeOwned {
    /// Creation time; the entry's identity within its collection.
    fn timestamp(&self) -> &str;

    /// Flattened text the search engine matches against.
    fn search_text(&self) -> String;

    /// One-line description shown in list views.
    fn summary(&self) -> String;
}

/// A JSON document wrapping an ordered, capped list of entries.
pub trait CollectionDocument: Default + Serialize + DeserializeOwned {
    type Item: Entry;

    /// Name used in logs, metrics and tool output.
    const NAME: &'static str;

    /// Maximum retained entries.
    const CAP: usize;

    fn entries(&self) -> &[Self::Item];

    fn entries_mut(&mut self) -> &mut Vec<Self::Item>;

    fn schema_version(&self) -> Option<u32>;

    fn set_schema_version(&mut self, version: u32);
}

/// Before/after counts from a prune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PruneOutcome {
    pub before: usize,
    pub after: usize,
}

/// A collection document bound to its file.
#[derive(Debug, Clone)]
pub struct CollectionStore<D> {
    path: PathBuf,
    _document: PhantomData<fn() -> D>,
}

impl<D: CollectionDocument> CollectionStore<D> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document, or an empty one if absent or corrupt.
    pub fn load(&self) -> D {
        json_store::load_or_default(&self.path)
    }

    /// Stamp the schema version and persist.
    pub fn save(&self, document: &mut D) -> Result<(), ForgeError> {
        document.set_schema_version(SCHEMA_VERSION);
        json_store::save(&self.path, document)
    }

    /// Append `entry`, enforce the cap and persist. Returns the new length.
    pub fn append(&self, entry: D::Item) -> Result<usize, ForgeError> {
        let mut document = self.load();
        let evicted = retention::append_bounded(document.entries_mut(), entry, D::CAP);
        self.save(&mut document)?;

        telemetry::record_entry(D::NAME);
        let len = document.entries().len();
        debug!(collection = D::NAME, len, evicted, "entry appended");
        Ok(len)
    }

    pub fn entries(&self) -> Vec<D::Item> {
        let mut document = self.load();
        std::mem::take(document.entries_mut())
    }

    pub fn len(&self) -> usize {
        self.load().entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> Vec<D::Item> {
        let document = self.load();
        search::recent(document.entries(), count).to_vec()
    }

    /// Entries matching `query`, at most the `limit` most recent.
    pub fn search(&self, query: &str, limit: usize) -> Vec<D::Item> {
        let document = self.load();
        search::search(document.entries(), query, <D::Item as Entry>::search_text, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Numbered view for a list call.
    pub fn list(&self, query: Option<&str>, limit: usize) -> Vec<ViewItem> {
        let document = self.load();
        index::list_view(document.entries(), query, limit)
    }

    /// Delete the entry at `index` of the view for `query`, persisting before returning.
    pub fn delete_at(
        &self,
        index: usize,
        query: Option<&str>,
    ) -> Result<Deletion<D::Item>, ForgeError> {
        let mut document = self.load();
        let deletion = index::delete_by_index(document.entries_mut(), index, query)?;
        self.save(&mut document)?;

        telemetry::record_deletion(D::NAME);
        info!(
            collection = D::NAME,
            index,
            timestamp = deletion.removed.timestamp(),
            remaining = deletion.remaining,
            "entry deleted"
        );
        Ok(deletion)
    }

    /// Drop entries not newer than `cutoff` and persist.
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<PruneOutcome, ForgeError> {
        let mut document = self.load();
        let before = document.entries().len();
        retention::prune_older_than(
            document.entries_mut(),
            cutoff,
            <D::Item as Entry>::timestamp,
        );
        let after = document.entries().len();
        self.save(&mut document)?;

        info!(collection = D::NAME, before, after, "collection pruned");
        Ok(PruneOutcome { before, after })
    }

    /// Replace the document with an empty one.
    pub fn clear(&self) -> Result<(), ForgeError> {
        self.save(&mut D::default())?;
        info!(collection = D::NAME, "collection cleared");
        Ok(())
    }
}
