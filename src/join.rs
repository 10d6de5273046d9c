//! Spawn Joiner: attach spawn-condition records to merged records by name.
//!
//! The spawn map is built from two directories — primary, then expansion —
//! keyed by lower-cased file stem, with the expansion overwriting the primary
//! on stem collision. A merged record matches when its lower-cased `name`
//! field equals a spawn key; matching rewrites the record's `source` to the
//! spawn entry's and embeds the full spawn record under `spawns`.
//!
//! The join operates on in-memory records handed over by a completed merge.
//! Only the standalone CLI path re-reads the index file from disk, and that
//! read is a hard precondition (see [`crate::index::load_index`]).

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{info, warn};

use crate::collect::eligible_files;
use crate::error::DexError;
use crate::record::{self, Record, SkippedFile};

// ---------------------------------------------------------------------------
// SpawnSource
// ---------------------------------------------------------------------------

/// One spawn directory and the provenance tag stamped on its records.
#[derive(Clone, Debug)]
pub struct SpawnSource {
    /// Directory holding per-entity spawn `.json` files.
    pub dir: PathBuf,
    /// Tag written to each spawn record's `source` field.
    pub tag: String,
}

impl SpawnSource {
    /// Create a spawn source.
    pub fn new(dir: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            tag: tag.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SpawnMap
// ---------------------------------------------------------------------------

/// Name-keyed spawn records plus the decode failures hit while building it.
#[derive(Clone, Debug, Default)]
pub struct SpawnMap {
    /// Spawn records keyed by lower-cased file stem.
    entries: BTreeMap<String, Record>,
    /// Files that failed to decode and were excluded from the map.
    pub skipped: Vec<SkippedFile>,
}

impl SpawnMap {
    /// Look up a spawn record by lower-cased name key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.entries.get(key)
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the spawn map from the primary directory, then the expansion
/// directory, expansion winning on stem collision.
///
/// Each record is tagged with its directory's `source` before insertion, so
/// the winning entry carries the winning provenance. Decode failures are
/// logged and collected, never fatal.
///
/// # Errors
///
/// Returns [`DexError::DirectoryNotFound`] if either spawn directory is
/// missing and [`DexError::Io`] if a file cannot be read.
pub fn build_spawn_map(
    primary: &SpawnSource,
    expansion: &SpawnSource,
    reserved: &str,
) -> Result<SpawnMap, DexError> {
    let mut map = SpawnMap::default();
    for source in [primary, expansion] {
        load_spawn_dir(source, reserved, &mut map)?;
    }
    info!(
        entries = map.len(),
        skipped = map.skipped.len(),
        "spawn map built"
    );
    Ok(map)
}

fn load_spawn_dir(source: &SpawnSource, reserved: &str, map: &mut SpawnMap) -> Result<(), DexError> {
    for file in eligible_files(&source.dir, reserved)? {
        let content = std::fs::read_to_string(&file.path)?;
        match record::parse_record(&content) {
            Ok(mut rec) => {
                rec.insert("source".to_owned(), Value::String(source.tag.clone()));
                map.entries.insert(file.stem_key(), rec);
            }
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "skipping undecodable spawn record");
                map.skipped.push(SkippedFile::new(file.path, e.to_string()));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// join_spawns
// ---------------------------------------------------------------------------

/// Attach spawn data to every merged record whose lower-cased `name` matches
/// a spawn key. Returns the number of records that matched.
///
/// On a match the record's `source` is replaced by the spawn entry's and the
/// full spawn record (its own `source` included) is embedded under `spawns`.
/// Unmatched records are left untouched.
pub fn join_spawns(records: &mut [Record], spawns: &SpawnMap) -> usize {
    let mut matched = 0;
    for rec in records.iter_mut() {
        let key = record::name_key(rec);
        if let Some(spawn) = spawns.get(&key) {
            if let Some(source) = spawn.get("source") {
                rec.insert("source".to_owned(), source.clone());
            }
            rec.insert("spawns".to_owned(), Value::Object(spawn.clone()));
            matched += 1;
        }
    }
    info!(matched, total = records.len(), "spawn join complete");
    matched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const RESERVED: &str = "_index.json";

    fn write_json(dir: &Path, name: &str, value: &serde_json::Value) {
        fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
    }

    fn record(v: serde_json::Value) -> Record {
        v.as_object().unwrap().clone()
    }

    fn sources(primary: &TempDir, expansion: &TempDir) -> (SpawnSource, SpawnSource) {
        (
            SpawnSource::new(primary.path(), "Cobblemon"),
            SpawnSource::new(expansion.path(), "AllTheMons"),
        )
    }

    #[test]
    fn map_keys_are_lowercased_stems() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        write_json(primary.path(), "Pikachu.json", &json!({"biome": "forest"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();

        assert!(map.get("pikachu").is_some());
        assert!(map.get("Pikachu").is_none(), "keys must be lower-cased");
    }

    #[test]
    fn expansion_overwrites_primary_on_collision() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        write_json(primary.path(), "pikachu.json", &json!({"biome": "forest"}));
        write_json(expansion.path(), "pikachu.json", &json!({"biome": "plains"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();

        let entry = map.get("pikachu").unwrap();
        assert_eq!(entry.get("biome"), Some(&json!("plains")));
        assert_eq!(entry.get("source"), Some(&json!("AllTheMons")));
    }

    #[test]
    fn map_entries_carry_their_directory_tag() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        write_json(primary.path(), "abra.json", &json!({"biome": "cave"}));
        write_json(expansion.path(), "mew.json", &json!({"biome": "jungle"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();

        assert_eq!(map.get("abra").unwrap().get("source"), Some(&json!("Cobblemon")));
        assert_eq!(map.get("mew").unwrap().get("source"), Some(&json!("AllTheMons")));
    }

    #[test]
    fn undecodable_spawn_files_are_skipped() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        fs::write(primary.path().join("bad.json"), "{oops").unwrap();
        write_json(primary.path(), "good.json", &json!({"biome": "forest"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.skipped.len(), 1);
    }

    #[test]
    fn missing_spawn_directory_is_fatal() {
        let primary = TempDir::new().unwrap();
        let missing = primary.path().join("no-such-dir");

        let p = SpawnSource::new(primary.path(), "Cobblemon");
        let e = SpawnSource::new(&missing, "AllTheMons");
        assert!(matches!(
            build_spawn_map(&p, &e, RESERVED),
            Err(DexError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn reserved_name_is_filtered_in_spawn_dirs_too() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        write_json(primary.path(), "_index.json", &json!({"name": "spurious"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn join_matches_by_lowercased_name() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        write_json(expansion.path(), "pikachu.json", &json!({"biome": "plains"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();

        let mut records = vec![record(json!({"name": "Pikachu", "source": "cobblemon"}))];
        let matched = join_spawns(&mut records, &map);

        assert_eq!(matched, 1);
        let rec = &records[0];
        assert_eq!(rec.get("source"), Some(&json!("AllTheMons")), "provenance propagated");
        let spawns = rec.get("spawns").and_then(Value::as_object).unwrap();
        assert_eq!(spawns.get("biome"), Some(&json!("plains")));
        assert_eq!(
            spawns.get("source"),
            Some(&json!("AllTheMons")),
            "embedded spawn keeps its own source field"
        );
    }

    #[test]
    fn join_leaves_unmatched_records_untouched() {
        let mut records = vec![record(json!({"name": "Missingno", "source": "orig"}))];
        let before = records.clone();

        let matched = join_spawns(&mut records, &SpawnMap::default());
        assert_eq!(matched, 0);
        assert_eq!(records, before);
    }

    #[test]
    fn join_skips_records_without_a_name() {
        let primary = TempDir::new().unwrap();
        let expansion = TempDir::new().unwrap();
        write_json(primary.path(), "pikachu.json", &json!({"biome": "forest"}));

        let (p, e) = sources(&primary, &expansion);
        let map = build_spawn_map(&p, &e, RESERVED).unwrap();

        let mut records = vec![record(json!({"dex": 25})), record(json!({"name": 25}))];
        assert_eq!(join_spawns(&mut records, &map), 0);
    }
}
