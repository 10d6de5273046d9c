//! Record model: one JSON object per entity, plus per-file skip diagnostics.
//!
//! Records carry no fixed schema. The merge process only ever *adds* fields
//! (`source`, and whatever field-overrides a source configures); it never
//! validates or reshapes the rest of the object.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

/// One entity record: an arbitrary JSON object, keyed by string field names.
///
/// `serde_json::Map` preserves insertion order of fields, so records round-trip
/// with their original field layout intact.
pub type Record = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// SkippedFile
// ---------------------------------------------------------------------------

/// Diagnostic for a file that failed to decode and was excluded from an
/// operation's output.
///
/// Skips are collected alongside the successfully parsed records and surfaced
/// to the caller as part of the operation result. They never abort the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path to the file that failed to decode.
    pub path: PathBuf,
    /// Parser error detail.
    pub detail: String,
}

impl SkippedFile {
    /// Create a new skip diagnostic.
    pub const fn new(path: PathBuf, detail: String) -> Self {
        Self { path, detail }
    }
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.detail)
    }
}

// ---------------------------------------------------------------------------
// Record helpers
// ---------------------------------------------------------------------------

/// Parse a record from raw file content.
///
/// Only JSON *objects* qualify as records; a file whose top-level value is an
/// array, string, or number is a decode failure like any other malformed file.
pub fn parse_record(content: &str) -> Result<Record, serde_json::Error> {
    serde_json::from_str(content)
}

/// Apply a source's decoration to a record: the provenance tag (written to
/// the `source` field) first, then the configured field-overrides in key
/// order. An override on `source` therefore wins over the tag.
pub fn decorate(record: &mut Record, tag: Option<&str>, overrides: &std::collections::BTreeMap<String, Value>) {
    if let Some(tag) = tag {
        record.insert("source".to_owned(), Value::String(tag.to_owned()));
    }
    for (key, value) in overrides {
        record.insert(key.clone(), value.clone());
    }
}

/// The record's `name` field, lower-cased, for spawn-map lookups.
///
/// Missing or non-string names collapse to the empty string, which matches
/// no spawn key (spawn keys come from file stems and are never empty).
pub fn name_key(record: &Record) -> String {
    record
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
