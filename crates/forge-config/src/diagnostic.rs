// SPDX-FileCopyrightText: 2026 Session Forge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error diagnostics.
//!
//! Figment errors are mapped onto [`ConfigError`], a miette diagnostic that
//! can point into the offending `forge.toml` and suggest the closest valid key
//! for typos.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {location}")]
    #[diagnostic(
        code(forge::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// `[section]` the key was found in, or `top level`.
        location: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a Session Forge setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(forge::config::invalid_type))]
    InvalidType { key: String, detail: String },

    /// A value parsed but failed a semantic check.
    #[error("{message}")]
    #[diagnostic(code(forge::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(forge::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let known = format!("known keys here: {valid_keys}");
    suggestion.map_or(known.clone(), |s| format!("did you mean `{s}`? {known}"))
}

/// Map every error carried by a `figment::Error` onto a [`ConfigError`].
///
/// `sources` pairs a file name with its contents so unknown keys can be
/// located and underlined.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let section = error.path.first().map(String::as_str);
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) = source_for(&error, sources)
                        .and_then(|(name, content)| {
                            locate_key(content, section, field).map(|offset| {
                                (
                                    Some(SourceSpan::new(offset.into(), field.len())),
                                    Some(NamedSource::new(name, content.to_string())),
                                )
                            })
                        })
                        .unwrap_or((None, None));
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        location: section.map_or("top level".to_string(), |s| format!("[{s}]")),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: error.path.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Pick the TOML source an error came from.
///
/// Inline strings carry no file metadata, so a single candidate is assumed.
fn source_for<'a>(
    error: &figment::error::Error,
    sources: &'a [(String, String)],
) -> Option<(&'a str, &'a str)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| s.file_path())
        .map(|p| p.display().to_string());

    let found = match file {
        Some(file) => sources.iter().find(|(name, _)| *name == file),
        None if sources.len() == 1 => sources.first(),
        None => None,
    };
    found.map(|(name, content)| (name.as_str(), content.as_str()))
}

/// Byte offset of `key` inside `[section]` (or before any table when `None`).
pub fn locate_key(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut offset = 0;
    let mut current: Option<&str> = None;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            current = header.split(']').next().map(str::trim);
        } else if current == section
            && let Some(rest) = trimmed.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if any is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render config errors to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION_KEYS: &[&str] = &["stale_hours", "history_limit"];

    #[test]
    fn typo_suggests_nearest_key() {
        assert_eq!(
            suggest_key("stale_hour", SESSION_KEYS).as_deref(),
            Some("stale_hours")
        );
        assert_eq!(
            suggest_key("histroy_limit", SESSION_KEYS).as_deref(),
            Some("history_limit")
        );
    }

    #[test]
    fn unrelated_key_gets_no_suggestion() {
        assert_eq!(suggest_key("zzzzzz", SESSION_KEYS), None);
    }

    #[test]
    fn locates_key_in_its_own_section() {
        let content = "[agent]\nbase_dri = 1\n[storage]\nbase_dri = \"/tmp\"\n";
        let offset = locate_key(content, Some("storage"), "base_dri").unwrap();
        assert_eq!(offset, content.rfind("base_dri").unwrap());
    }

    #[test]
    fn missing_section_is_not_located() {
        let content = "[agent]\nlog_level = \"info\"\n";
        assert!(locate_key(content, Some("storage"), "log_level").is_none());
    }

    #[test]
    fn top_level_key_stops_at_first_table() {
        let content = "verbose = true\n[agent]\nlog_level = \"info\"\n";
        assert_eq!(locate_key(content, None, "verbose"), Some(0));
        assert!(locate_key(content, None, "log_level").is_none());
    }

    #[test]
    fn help_lists_known_keys() {
        let help = unknown_key_help(Some("stale_hours"), "stale_hours, history_limit");
        assert!(help.starts_with("did you mean `stale_hours`?"));
        assert!(help.ends_with("stale_hours, history_limit"));
    }
}
