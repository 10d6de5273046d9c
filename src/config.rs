//! dexmerge configuration (`dexmerge.toml`).
//!
//! Defines the typed configuration for a merge run: the output index path,
//! the ordered list of dex sources, and the spawn directories for the join
//! step. Missing fields use defaults; a missing file means all defaults
//! (no error). The defaults reproduce the classic Cobblemon + AllTheMons
//! layout this tool was built for.
//!
//! ```toml
//! index = "public/data/_index.json"
//!
//! [[source]]
//! dir = "public/data/dex/cobblemon"
//! tag = "cobblemon"
//! set = { drops = "", moves = "" }
//!
//! [[source]]
//! dir = "public/data/dex/atm"
//! tag = "AllTheMons"
//! set = { drops = "", moves = "" }
//!
//! [spawns.primary]
//! dir = "public/data/spawn/cobblemon"
//! tag = "Cobblemon"
//!
//! [spawns.expansion]
//! dir = "public/data/spawn/atm"
//! tag = "AllTheMons"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Value, json};

use crate::join::SpawnSource;
use crate::merge::SourceSpec;

/// Fallback reserved file name if the index path has no usable file name.
const DEFAULT_INDEX_NAME: &str = "_index.json";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level dexmerge configuration.
///
/// Parsed from `dexmerge.toml`. The `source` list is ordered: later sources
/// take precedence over earlier ones on file-name collision.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DexConfig {
    /// Path of the merged index output file.
    #[serde(default = "default_index")]
    pub index: PathBuf,

    /// Ordered dex sources, lowest precedence first.
    #[serde(default = "default_sources", rename = "source")]
    pub sources: Vec<SourceConfig>,

    /// Spawn directories for the join step.
    #[serde(default)]
    pub spawns: SpawnsConfig,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            index: default_index(),
            sources: default_sources(),
            spawns: SpawnsConfig::default(),
        }
    }
}

impl DexConfig {
    /// Load configuration from `path`. Missing file → all defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or contains unknown fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }

    /// The reserved file name excluded from every input directory: the
    /// index output's own file name.
    pub fn reserved_name(&self) -> String {
        self.index
            .file_name()
            .map_or_else(|| DEFAULT_INDEX_NAME.to_owned(), |n| n.to_string_lossy().into_owned())
    }

    /// The configured sources as merge-ready specs, in precedence order.
    pub fn source_specs(&self) -> Vec<SourceSpec> {
        self.sources
            .iter()
            .map(|s| SourceSpec {
                dir: s.dir.clone(),
                tag: s.tag.clone(),
                overrides: s.set.clone(),
            })
            .collect()
    }

    /// The spawn directories as join-ready sources: (primary, expansion).
    pub fn spawn_sources(&self) -> (SpawnSource, SpawnSource) {
        (
            SpawnSource::new(&self.spawns.primary.dir, &self.spawns.primary.tag),
            SpawnSource::new(&self.spawns.expansion.dir, &self.spawns.expansion.tag),
        )
    }
}

fn default_index() -> PathBuf {
    PathBuf::from("public/data/_index.json")
}

fn default_sources() -> Vec<SourceConfig> {
    let clear: BTreeMap<String, Value> =
        [("drops".to_owned(), json!("")), ("moves".to_owned(), json!(""))]
            .into_iter()
            .collect();
    vec![
        SourceConfig {
            dir: PathBuf::from("public/data/dex/cobblemon"),
            tag: Some("cobblemon".to_owned()),
            set: clear.clone(),
        },
        SourceConfig {
            dir: PathBuf::from("public/data/dex/atm"),
            tag: Some("AllTheMons".to_owned()),
            set: clear,
        },
    ]
}

// ---------------------------------------------------------------------------
// SourceConfig
// ---------------------------------------------------------------------------

/// One dex source directory.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory of per-record `.json` files.
    pub dir: PathBuf,

    /// Provenance tag written to each record's `source` field. Omit for
    /// plain undecorated concatenation.
    #[serde(default)]
    pub tag: Option<String>,

    /// Field-overrides applied to every record from this source.
    #[serde(default)]
    pub set: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// SpawnsConfig
// ---------------------------------------------------------------------------

/// Spawn directories for the join step.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnsConfig {
    /// Base spawn data; loses on stem collision.
    #[serde(default = "default_spawn_primary")]
    pub primary: SpawnDirConfig,

    /// Expansion spawn data; wins on stem collision.
    #[serde(default = "default_spawn_expansion")]
    pub expansion: SpawnDirConfig,
}

impl Default for SpawnsConfig {
    fn default() -> Self {
        Self {
            primary: default_spawn_primary(),
            expansion: default_spawn_expansion(),
        }
    }
}

/// One spawn directory and its provenance tag.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnDirConfig {
    /// Directory of per-entity spawn `.json` files.
    pub dir: PathBuf,
    /// Tag stamped on each spawn record's `source` field.
    pub tag: String,
}

fn default_spawn_primary() -> SpawnDirConfig {
    SpawnDirConfig {
        dir: PathBuf::from("public/data/spawn/cobblemon"),
        // Capitalized in the spawn data, lower-case in the dex data. The
        // discrepancy is part of the published dataset, so it stays.
        tag: "Cobblemon".to_owned(),
    }
}

fn default_spawn_expansion() -> SpawnDirConfig {
    SpawnDirConfig {
        dir: PathBuf::from("public/data/spawn/atm"),
        tag: "AllTheMons".to_owned(),
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A configuration file failed to load or parse.
#[derive(Debug)]
pub struct ConfigError {
    /// Path to the offending file, when known.
    pub path: Option<PathBuf>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "config error in '{}': {}", path.display(), self.message),
            None => write!(f, "config error: {}", self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
