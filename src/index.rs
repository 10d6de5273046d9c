//! Reading and writing the merged index file.
//!
//! The index is a single UTF-8 JSON file holding an array of records,
//! pretty-printed with 4-space indentation. Writes replace the file wholesale;
//! there is no appending or in-place patching.

use std::path::Path;

use serde::Serialize as _;
use serde_json::ser::PrettyFormatter;

use crate::error::DexError;
use crate::record::Record;

/// Write `records` to `path` as a 4-space-indented JSON array, overwriting
/// any existing file.
///
/// # Errors
///
/// Returns [`DexError::Io`] if the file cannot be created or written.
pub fn write_index(path: &Path, records: &[Record]) -> Result<(), DexError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records
        .serialize(&mut ser)
        .map_err(|e| DexError::Io(std::io::Error::other(e)))?;
    // BufWriter flush errors surface here rather than being swallowed on drop.
    std::io::Write::flush(&mut writer)?;
    Ok(())
}

/// Load a previously written merged index.
///
/// This is a hard precondition of the standalone join: a missing or malformed
/// index aborts the operation, unlike per-record decode failures elsewhere.
///
/// # Errors
///
/// Returns [`DexError::IndexNotFound`] if the file does not exist,
/// [`DexError::IndexMalformed`] if it is not a JSON array of objects, and
/// [`DexError::Io`] for any other read failure.
pub fn load_index(path: &Path) -> Result<Vec<Record>, DexError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DexError::IndexNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(DexError::Io(e)),
    };

    serde_json::from_str(&content).map_err(|e| DexError::IndexMalformed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}
