//! Directory collection: enumerate the eligible record files in one source
//! directory.
//!
//! # Invariants
//!
//! - **Determinism**: results are sorted lexicographically by file name, so
//!   the same directory contents always produce the same collection order
//!   regardless of the platform's directory iteration order.
//! - **Eligibility**: only regular files whose name ends in `.json` and is
//!   not exactly the reserved index file name are returned. The reserved-name
//!   filter is applied uniformly to every directory the tool reads, spawn
//!   directories included.

use std::path::{Path, PathBuf};

use crate::error::DexError;

/// The `.json` suffix an eligible file must carry.
const JSON_SUFFIX: &str = ".json";

// ---------------------------------------------------------------------------
// EligibleFile
// ---------------------------------------------------------------------------

/// One file selected by the collector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EligibleFile {
    /// The bare file name (merge key), e.g. `pikachu.json`.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

impl EligibleFile {
    /// The file name without its `.json` suffix, lower-cased (spawn-map key).
    pub fn stem_key(&self) -> String {
        self.name
            .strip_suffix(JSON_SUFFIX)
            .unwrap_or(&self.name)
            .to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// eligible_files
// ---------------------------------------------------------------------------

/// Collect the eligible record files in `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`DexError::DirectoryNotFound`] if `dir` does not exist or is not
/// a directory, and [`DexError::Io`] if the directory cannot be read.
pub fn eligible_files(dir: &Path, reserved: &str) -> Result<Vec<EligibleFile>, DexError> {
    if !dir.is_dir() {
        return Err(DexError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(JSON_SUFFIX) || name == reserved {
            continue;
        }
        files.push(EligibleFile {
            name,
            path: entry.path(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RESERVED: &str = "_index.json";

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "{}").unwrap();
    }

    #[test]
    fn collects_only_json_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pikachu.json");
        touch(tmp.path(), "bulbasaur.json");
        touch(tmp.path(), "readme.txt");
        touch(tmp.path(), "notes.md");

        let files = eligible_files(tmp.path(), RESERVED).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["bulbasaur.json", "pikachu.json"]);
    }

    #[test]
    fn excludes_reserved_index_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "_index.json");
        touch(tmp.path(), "pikachu.json");

        let files = eligible_files(tmp.path(), RESERVED).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["pikachu.json"]);
    }

    #[test]
    fn excludes_subdirectories_even_with_json_suffix() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested.json")).unwrap();
        touch(tmp.path(), "pikachu.json");

        let files = eligible_files(tmp.path(), RESERVED).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["pikachu.json"]);
    }

    #[test]
    fn empty_directory_yields_empty_collection() {
        let tmp = TempDir::new().unwrap();
        let files = eligible_files(tmp.path(), RESERVED).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_is_directory_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no-such-dir");

        let err = eligible_files(&missing, RESERVED).unwrap_err();
        match err {
            DexError::DirectoryNotFound { path } => assert_eq!(path, missing),
            other => panic!("expected DirectoryNotFound, got {other}"),
        }
    }

    #[test]
    fn plain_file_path_is_directory_not_found() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not-a-dir.json");
        fs::write(&file, "{}").unwrap();

        assert!(matches!(
            eligible_files(&file, RESERVED),
            Err(DexError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn order_is_lexicographic_by_name() {
        let tmp = TempDir::new().unwrap();
        for name in ["zubat.json", "abra.json", "mew.json"] {
            touch(tmp.path(), name);
        }

        let files = eligible_files(tmp.path(), RESERVED).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["abra.json", "mew.json", "zubat.json"]);
    }

    #[test]
    fn stem_key_strips_suffix_and_lowercases() {
        let f = EligibleFile {
            name: "Pikachu.json".to_owned(),
            path: PathBuf::from("spawn/Pikachu.json"),
        };
        assert_eq!(f.stem_key(), "pikachu");
    }
}
