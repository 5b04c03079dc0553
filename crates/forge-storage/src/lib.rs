// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic record-store engine for Session Forge.
//!
//! Every memory collection (journal, decisions, dead ends) is a JSON document
//! wrapping an ordered, capped list of timestamped entries. This crate holds
//! the pieces those collections share:
//!
//! - [`json_store`]: load-with-fallback, atomic save, remove
//! - [`retention`]: fixed caps with oldest-first eviction, age-based pruning
//! - [`search`]: multi-term substring search with recency fallback
//! - [`index`]: the 1-based list view and delete-by-index protocol
//! - [`collection`]: the [`Entry`] and [`CollectionDocument`] traits and
//!   [`CollectionStore`], which binds all of the above to one file
//! - [`paths`]: the on-disk layout under one base directory

pub mod collection;
pub mod index;
pub mod json_store;
pub mod paths;
pub mod retention;
pub mod search;
pub mod telemetry;

pub use collection::{CollectionDocument, CollectionStore, Entry, PruneOutcome, SCHEMA_VERSION};
pub use index::{Deletion, ViewItem, delete_by_index, list_view};
pub use json_store::{load, recovered_count, remove, save};
pub use paths::StorePaths;
pub use retention::{append_bounded, enforce_cap};
pub use search::search;
