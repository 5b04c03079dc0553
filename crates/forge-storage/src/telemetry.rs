// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade, so nothing is exported unless the embedding
//! application installs a recorder.

use metrics::describe_counter;

/// Register all store metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "forge_store_recovered_total",
        "Documents that failed to read or parse and fell back to their default"
    );
    describe_counter!(
        "forge_entries_recorded_total",
        "Entries appended to a collection"
    );
    describe_counter!(
        "forge_entries_deleted_total",
        "Entries removed through delete-by-index"
    );
}

/// Record a load that fell back to the default document.
pub fn record_recovery(file: &str) {
    metrics::counter!("forge_store_recovered_total", "file" => file.to_string()).increment(1);
}

/// Record an appended entry.
pub fn record_entry(collection: &str) {
    metrics::counter!("forge_entries_recorded_total", "collection" => collection.to_string())
        .increment(1);
}

/// Record a deleted entry.
pub fn record_deletion(collection: &str) {
    metrics::counter!("forge_entries_deleted_total", "collection" => collection.to_string())
        .increment(1);
}
