// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The user profile singleton.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use forge_core::{ForgeError, format_timestamp};
use forge_storage::json_store;
use forge_storage::retention::{PROFILE_NOTES_CAP, enforce_cap};
use tracing::info;

use crate::types::{Profile, ProfileNote};

/// Changes applied by [`ProfileStore::update`]. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub preferences: Option<BTreeMap<String, String>>,
    pub add_project: Option<String>,
    pub add_note: Option<String>,
}

/// `profile.json`.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored profile, or a fresh one for `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Profile {
        json_store::load(&self.path, Profile::default_at(now))
    }

    pub fn update(&self, update: ProfileUpdate, now: DateTime<Utc>) -> Result<Profile, ForgeError> {
        let mut profile = self.get(now);
        let stamp = format_timestamp(now);

        if let Some(name) = update.name.filter(|n| !n.is_empty()) {
            profile.name = Some(name);
        }
        if let Some(preferences) = update.preferences {
            profile.preferences.extend(preferences);
        }
        if let Some(project) = update.add_project.filter(|p| !p.is_empty())
            && !profile.projects.contains(&project)
        {
            profile.projects.push(project);
        }
        if let Some(content) = update.add_note.filter(|n| !n.is_empty()) {
            profile.notes.push(ProfileNote {
                content,
                timestamp: stamp.clone(),
            });
            enforce_cap(&mut profile.notes, PROFILE_NOTES_CAP);
        }

        profile.updated_at = stamp;
        json_store::save(&self.path, &profile)?;
        info!(
            projects = profile.projects.len(),
            notes = profile.notes.len(),
            "profile updated"
        );
        Ok(profile)
    }

    /// Overwrite the profile with the default for `now`.
    pub fn reset(&self, now: DateTime<Utc>) -> Result<Profile, ForgeError> {
        let profile = Profile::default_at(now);
        json_store::save(&self.path, &profile)?;
        info!("profile reset");
        Ok(profile)
    }
}
