//! Error types for dexmerge operations.
//!
//! Defines [`DexError`], the unified error type for the merge and join
//! operations. Error messages are designed to be actionable: each variant
//! includes a clear description of what went wrong and guidance on how to
//! fix it.
//!
//! Per-file JSON decode failures are deliberately *not* represented here —
//! they are contained, surfaced as [`SkippedFile`](crate::record::SkippedFile)
//! diagnostics, and never abort an operation.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// DexError
// ---------------------------------------------------------------------------

/// Unified error type for merge and join operations.
///
/// Every variant aborts the enclosing operation. When a merge aborts, no
/// output file is written or modified.
#[derive(Debug)]
pub enum DexError {
    /// A configured input directory does not exist or is not a directory.
    DirectoryNotFound {
        /// The path that was expected to be a directory.
        path: PathBuf,
    },

    /// The merged index file required by the join step does not exist.
    IndexNotFound {
        /// Path to the missing index file.
        path: PathBuf,
    },

    /// The merged index file exists but is not a valid JSON array of records.
    IndexMalformed {
        /// Path to the index file.
        path: PathBuf,
        /// Parser error detail.
        detail: String,
    },

    /// A configuration file could not be loaded or parsed.
    ConfigError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// An I/O error occurred while reading a record or writing the index.
    Io(std::io::Error),
}

// ---------------------------------------------------------------------------
// Display — actionable error messages
// ---------------------------------------------------------------------------

impl fmt::Display for DexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(
                    f,
                    "directory '{}' does not exist or is not accessible.\n  To fix: check the configured paths in dexmerge.toml.",
                    path.display()
                )
            }
            Self::IndexNotFound { path } => {
                write!(
                    f,
                    "merged index '{}' not found.\n  To fix: run the merge first:\n    dexmerge merge",
                    path.display()
                )
            }
            Self::IndexMalformed { path, detail } => {
                write!(
                    f,
                    "merged index '{}' is not a valid record array: {}\n  To fix: re-run the merge to regenerate it:\n    dexmerge merge",
                    path.display(),
                    detail
                )
            }
            Self::ConfigError { path, detail } => {
                write!(
                    f,
                    "configuration error in '{}': {}\n  To fix: edit the config file and correct the issue.",
                    path.display(),
                    detail
                )
            }
            Self::Io(err) => {
                write!(
                    f,
                    "I/O error: {err}\n  To fix: check file permissions and disk space."
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for DexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls
// ---------------------------------------------------------------------------

impl From<std::io::Error> for DexError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<crate::config::ConfigError> for DexError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::ConfigError {
            path: err.path.unwrap_or_default(),
            detail: err.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
