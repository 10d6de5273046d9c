use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use dexmerge::config::DexConfig;
use dexmerge::error::DexError;
use dexmerge::telemetry;

mod commands;

/// Dex index builder
///
/// dexmerge folds several directories of per-species JSON records (one file
/// per species, from multiple content packs) into a single combined index
/// file, and can attach spawn-condition data onto the merged records by
/// species name.
///
/// PRECEDENCE:
///   Sources are processed in config order — a later source overwrites an
///   earlier one when both ship a file with the same name. Spawn data works
///   the same way: the expansion directory wins over the primary.
///
/// QUICK START:
///
///   # Merge and join in one pass, using dexmerge.toml (or built-in defaults)
///   dexmerge run
///
///   # Merge only
///   dexmerge merge
///
///   # Attach spawns to an index written by an earlier merge
///   dexmerge join
///
/// Decode failures in individual record files are skipped and reported; a
/// missing input directory aborts the operation with a non-zero exit status.
#[derive(Parser)]
#[command(name = "dexmerge")]
#[command(version, about)]
#[command(after_help = "See 'dexmerge <command> --help' for more information on a specific command.")]
struct Cli {
    /// Path to the configuration file (missing file → built-in defaults)
    #[arg(short, long, global = true, default_value = "dexmerge.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the dex sources into the index file
    Merge,

    /// Attach spawn data to an existing index file
    ///
    /// Requires an index written by a previous merge; fails if the index
    /// is missing or malformed.
    Join,

    /// Merge, then join, in one pass
    ///
    /// The join consumes the merge result directly — it never re-reads a
    /// possibly stale index file from disk.
    Run,
}

fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();
    let cfg = DexConfig::load(&cli.config).map_err(DexError::from)?;

    match cli.command {
        Commands::Merge => commands::merge(&cfg),
        Commands::Join => commands::join(&cfg),
        Commands::Run => commands::run(&cfg),
    }
}
