//! Shared test helpers for dexmerge integration tests.
//!
//! All tests use temp directories — no side effects on the working tree.
//! CLI tests run the real binary with its working directory pinned inside
//! the temp tree.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Write `value` as a JSON file named `name` under `dir`, creating the
/// directory first if needed.
pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
}

/// Read an index file back as a JSON value.
pub fn read_index(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read index {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("index {} is not valid JSON: {e}", path.display()))
}

/// Run the dexmerge binary with `args`, with `cwd` as its working directory.
pub fn dexmerge_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dexmerge"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run dexmerge binary")
}

/// Stdout of a finished process as a string.
pub fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Stderr of a finished process as a string.
pub fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// Lay out the classic default data tree under `root`:
/// `public/data/dex/cobblemon`, `public/data/dex/atm`,
/// `public/data/spawn/cobblemon`, `public/data/spawn/atm`.
///
/// Directories are created empty; tests populate what they need.
pub fn classic_layout(root: &Path) {
    for rel in [
        "public/data/dex/cobblemon",
        "public/data/dex/atm",
        "public/data/spawn/cobblemon",
        "public/data/spawn/atm",
    ] {
        fs::create_dir_all(root.join(rel)).unwrap();
    }
}
