// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `forge stats`, `forge export` and `forge paths`.

use forge_config::ForgeConfig;
use forge_core::ForgeError;
use forge_memory::{ForgeMemory, manage};
use forge_storage::StorePaths;
use serde_json::{Value, json};

fn open(config: &ForgeConfig) -> Result<ForgeMemory, ForgeError> {
    Ok(ForgeMemory::open(StorePaths::resolve(&config.storage)?))
}

fn print_json(value: &Value) -> Result<(), ForgeError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_stats(config: &ForgeConfig) -> Result<(), ForgeError> {
    let memory = open(config)?;
    print_json(&serde_json::to_value(manage::stats(&memory)?)?)
}

pub fn run_export(config: &ForgeConfig) -> Result<(), ForgeError> {
    let memory = open(config)?;
    print_json(&serde_json::to_value(manage::export(&memory, chrono::Utc::now()))?)
}

pub fn run_paths(config: &ForgeConfig) -> Result<(), ForgeError> {
    print_json(&paths_json(&StorePaths::resolve(&config.storage)?))
}

/// The resolved layout as a JSON object of display strings.
fn paths_json(paths: &StorePaths) -> Value {
    json!({
        "base": paths.base.display().to_string(),
        "profile": paths.profile.display().to_string(),
        "journal": paths.journal.display().to_string(),
        "decisions": paths.decisions.display().to_string(),
        "dead_ends": paths.dead_ends.display().to_string(),
        "active_session": paths.active_session.display().to_string(),
        "session_history": paths.session_history.display().to_string(),
    })
}
