// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable JSON documents on the local filesystem.
//!
//! Reads never fail: a missing, unreadable or unparsable file yields the
//! caller's fallback. Unreadable and unparsable files are logged, counted in
//! [`recovered_count`] and reported to the `forge_store_recovered_total`
//! counter so silent recovery stays observable. Writes go through a temp file
//! in the target directory and an atomic rename, so a reader never observes a
//! partially written document.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use forge_core::ForgeError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::telemetry;

static RECOVERED: AtomicU64 = AtomicU64::new(0);

/// Number of loads in this process that fell back because an existing file
/// could not be read or parsed.
pub fn recovered_count() -> u64 {
    RECOVERED.load(Ordering::Relaxed)
}

/// Load the document at `path`, or return `fallback` if it is absent or corrupt.
pub fn load<T: DeserializeOwned>(path: &Path, fallback: T) -> T {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "document absent, using default");
            return fallback;
        }
        Err(e) => {
            note_recovery(path, &e);
            return fallback;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(document) => document,
        Err(e) => {
            note_recovery(path, &e);
            fallback
        }
    }
}

/// Load the document at `path`, or `T::default()` if it is absent or corrupt.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    load(path, T::default())
}

/// Serialize `document` as pretty-printed JSON and atomically replace `path`.
///
/// Missing parent directories are created first.
pub fn save<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<(), ForgeError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(ForgeError::storage)?;

    let json = serde_json::to_string_pretty(document)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(ForgeError::storage)?;
    tmp.write_all(json.as_bytes()).map_err(ForgeError::storage)?;
    tmp.as_file().sync_all().map_err(ForgeError::storage)?;
    tmp.persist(path).map_err(|e| ForgeError::storage(e.error))?;

    debug!(path = %path.display(), bytes = json.len(), "document saved");
    Ok(())
}

/// Delete the document at `path`. Returns whether a file was removed.
///
/// Filesystem errors other than "not found" are logged and reported as `false`.
pub fn remove(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "document removed");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove document");
            false
        }
    }
}

fn note_recovery(path: &Path, err: &dyn std::error::Error) {
    RECOVERED.fetch_add(1, Ordering::Relaxed);
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    telemetry::record_recovery(&file);
    warn!(path = %path.display(), error = %err, "unreadable document, falling back to default");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<u32>,
    }

    fn doc(items: &[&str]) -> Doc {
        Doc {
            items: items.iter().map(|s| s.to_string()).collect(),
            version: Some(1),
        }
    }

    #[test]
    fn load_missing_returns_fallback_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("missing.json");

        let loaded = load(&path, doc(&["fallback"]));
        assert_eq!(loaded, doc(&["fallback"]));
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn save_then_load_returns_same_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        let original = doc(&["a", "b", "ünïcödé"]);
        save(&path, &original).unwrap();
        let loaded: Doc = load(&path, Doc::default());
        assert_eq!(loaded, original);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c.json");

        save(&path, &doc(&["x"])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_writes_pretty_json_with_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        save(&path, &doc(&["x"])).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"items\": [\n    \"x\"\n  ]"));
    }

    #[test]
    fn save_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        save(&path, &doc(&["one", "two", "three"])).unwrap();
        save(&path, &Doc::default()).unwrap();
        let loaded: Doc = load(&path, doc(&["fallback"]));
        assert_eq!(loaded, Doc::default());
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        save(&path, &doc(&["x"])).unwrap();
        save(&path, &doc(&["y"])).unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("doc.json")]);
    }

    #[test]
    fn corrupt_file_falls_back_and_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "{ not json").unwrap();

        let before = recovered_count();
        let loaded = load(&path, doc(&["fallback"]));
        assert_eq!(loaded, doc(&["fallback"]));
        assert!(recovered_count() > before);
        // The corrupt file is left untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn wrong_shape_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.json");
        std::fs::write(&path, r#"{"items": 42}"#).unwrap();

        let loaded: Doc = load(&path, Doc::default());
        assert_eq!(loaded, Doc::default());
    }

    #[test]
    fn null_document_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("active.json");
        std::fs::write(&path, "null").unwrap();

        let loaded: Option<Doc> = load(&path, Some(doc(&["fallback"])));
        assert!(loaded.is_none());
    }

    #[test]
    fn remove_reports_whether_file_existed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        assert!(!remove(&path));
        save(&path, &doc(&["x"])).unwrap();
        assert!(remove(&path));
        assert!(!path.exists());
        assert!(!remove(&path));
    }

    #[test]
    fn remove_on_directory_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove(dir.path()));
        assert!(dir.path().exists());
    }

    #[test]
    fn save_into_file_parent_fails_with_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = save(&blocker.join("doc.json"), &doc(&["x"])).unwrap_err();
        assert!(matches!(err, ForgeError::Storage { .. }));
    }
}
