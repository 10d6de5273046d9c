//! Record Merger: fold ordered source directories into one record map.
//!
//! Sources are processed strictly in list order. Each eligible file becomes
//! one map entry keyed by its file name; a later source overwrites an earlier
//! one on key collision (last writer wins), so source order *is* precedence
//! order.
//!
//! # Determinism guarantee
//!
//! The same directory contents always produce the same output, byte for byte:
//!
//! - Files within a source are collected in lexicographic name order.
//! - The merged map is a `BTreeMap`, so output records are emitted in
//!   lexicographic file-name order regardless of which source supplied them.
//! - Decode failures are skipped, never reordered around.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::collect::eligible_files;
use crate::error::DexError;
use crate::record::{self, Record, SkippedFile};

// ---------------------------------------------------------------------------
// SourceSpec
// ---------------------------------------------------------------------------

/// One source directory in a merge run.
#[derive(Clone, Debug)]
pub struct SourceSpec {
    /// Directory holding this source's per-record `.json` files.
    pub dir: PathBuf,
    /// Provenance tag written to each record's `source` field. `None` leaves
    /// records undecorated (plain concatenation).
    pub tag: Option<String>,
    /// Extra field-overrides applied to every record from this source,
    /// e.g. resetting `drops` and `moves` to `""`.
    pub overrides: BTreeMap<String, Value>,
}

impl SourceSpec {
    /// A source with a provenance tag and no extra overrides.
    pub fn new(dir: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            tag: Some(tag.into()),
            overrides: BTreeMap::new(),
        }
    }

    /// An undecorated source (no tag, no overrides).
    pub fn untagged(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tag: None,
            overrides: BTreeMap::new(),
        }
    }

    /// Attach field-overrides to this source.
    #[must_use]
    pub fn with_overrides(mut self, overrides: BTreeMap<String, Value>) -> Self {
        self.overrides = overrides;
        self
    }
}

// ---------------------------------------------------------------------------
// MergeOutcome
// ---------------------------------------------------------------------------

/// Result of a merge run: the ordered records plus per-file skip diagnostics.
#[derive(Clone, Debug, Default)]
pub struct MergeOutcome {
    /// Merged records in lexicographic file-name order, one per distinct key.
    pub records: Vec<Record>,
    /// Files that failed to decode and were excluded.
    pub skipped: Vec<SkippedFile>,
}

// ---------------------------------------------------------------------------
// merge_sources
// ---------------------------------------------------------------------------

/// Merge every eligible record from `sources`, in order, into a single
/// deduplicated record list.
///
/// For each source: collect its eligible files, parse each as a JSON object,
/// decorate with the source's tag and overrides, and insert under the file
/// name. Later sources overwrite earlier ones on the same file name. Decode
/// failures are logged, recorded in the outcome, and skipped.
///
/// This performs no I/O beyond reading the source files — writing the index
/// is the caller's step, taken only after the whole merge has succeeded.
///
/// # Errors
///
/// Returns [`DexError::DirectoryNotFound`] if any source directory is missing
/// and [`DexError::Io`] if a file cannot be read. Either aborts the merge.
pub fn merge_sources(sources: &[SourceSpec], reserved: &str) -> Result<MergeOutcome, DexError> {
    let mut merged: BTreeMap<String, Record> = BTreeMap::new();
    let mut skipped = Vec::new();

    for source in sources {
        let files = eligible_files(&source.dir, reserved)?;
        debug!(
            dir = %source.dir.display(),
            tag = source.tag.as_deref().unwrap_or("<none>"),
            files = files.len(),
            "collected source directory"
        );

        for file in files {
            let content = std::fs::read_to_string(&file.path)?;
            match record::parse_record(&content) {
                Ok(mut rec) => {
                    record::decorate(&mut rec, source.tag.as_deref(), &source.overrides);
                    merged.insert(file.name, rec);
                }
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "skipping undecodable record");
                    skipped.push(SkippedFile::new(file.path, e.to_string()));
                }
            }
        }
    }

    info!(
        records = merged.len(),
        skipped = skipped.len(),
        "merge complete"
    );

    Ok(MergeOutcome {
        records: merged.into_values().collect(),
        skipped,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
