// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term collaboration memory for Session Forge.
//!
//! Each store is a thin domain layer over `forge-storage`:
//!
//! - **ProfileStore**: the user profile singleton
//! - **Journal**: per-session narrative entries
//! - **Decisions** / **DeadEnds**: searchable decision and failure logs
//! - **SessionStore**: the active checkpoint and its archive
//! - **context**: the aggregated start-of-session view
//! - **manage**: stats, export, prune and clear
//!
//! Operations that stamp data take an explicit `now` so callers (and tests)
//! control the clock.

pub mod context;
pub mod dead_ends;
pub mod decisions;
pub mod journal;
pub mod manage;
pub mod profile;
pub mod sessions;
pub mod stores;
pub mod types;

pub use context::{FullContext, full_context};
pub use dead_ends::{DeadEnds, NewDeadEnd};
pub use decisions::{Decisions, NewDecision};
pub use journal::{Journal, NewJournalEntry};
pub use manage::StoreSelector;
pub use profile::{ProfileStore, ProfileUpdate};
pub use sessions::{NewCheckpoint, Restore, SessionStore};
pub use stores::ForgeMemory;
pub use types::*;
