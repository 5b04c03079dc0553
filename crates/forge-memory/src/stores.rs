// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use forge_storage::StorePaths;

use crate::dead_ends::DeadEnds;
use crate::decisions::Decisions;
use crate::journal::Journal;
use crate::profile::ProfileStore;
use crate::sessions::SessionStore;

/// Every memory store, bound to one base directory.
#[derive(Debug, Clone)]
pub struct ForgeMemory {
    paths: StorePaths,
    pub profile: ProfileStore,
    pub journal: Journal,
    pub decisions: Decisions,
    pub dead_ends: DeadEnds,
    pub sessions: SessionStore,
}

impl ForgeMemory {
    pub fn open(paths: StorePaths) -> Self {
        Self {
            profile: ProfileStore::new(&paths.profile),
            journal: Journal::new(&paths.journal),
            decisions: Decisions::new(&paths.decisions),
            dead_ends: DeadEnds::new(&paths.dead_ends),
            sessions: SessionStore::new(&paths.active_session, &paths.session_history),
            paths,
        }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }
}
