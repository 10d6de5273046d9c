//! Command implementations behind the CLI: merge, join, and the chained run.
//!
//! Status lines go to stdout; diagnostics go through tracing to stderr. Skips
//! are additionally echoed to stdout so a plain run shows which files were
//! dropped without needing `RUST_LOG`.

use anyhow::Result;

use dexmerge::config::DexConfig;
use dexmerge::index::{load_index, write_index};
use dexmerge::join::{build_spawn_map, join_spawns};
use dexmerge::merge::merge_sources;
use dexmerge::record::{Record, SkippedFile};

/// Merge the configured dex sources and write the index file.
pub fn merge(cfg: &DexConfig) -> Result<()> {
    let outcome = merge_sources(&cfg.source_specs(), &cfg.reserved_name())?;
    write_index(&cfg.index, &outcome.records)?;
    report_skips(&outcome.skipped);
    println!(
        "Merged index written to {} ({} records, {} skipped)",
        cfg.index.display(),
        outcome.records.len(),
        outcome.skipped.len()
    );
    Ok(())
}

/// Attach spawn data to a previously written index file.
///
/// The index must already exist and parse: this is the standalone variant
/// for indexes produced by an earlier run.
pub fn join(cfg: &DexConfig) -> Result<()> {
    let mut records = load_index(&cfg.index)?;
    let matched = join_onto(cfg, &mut records)?;
    write_index(&cfg.index, &records)?;
    println!(
        "Spawn data joined onto {} ({} of {} records matched)",
        cfg.index.display(),
        matched,
        records.len()
    );
    Ok(())
}

/// Merge, then join, passing the merge result to the join in memory.
///
/// The join only ever sees records from a merge that just succeeded — it
/// never re-reads the index file, so it cannot pick up a stale index left
/// behind by an earlier failed run.
pub fn run(cfg: &DexConfig) -> Result<()> {
    let mut outcome = merge_sources(&cfg.source_specs(), &cfg.reserved_name())?;
    write_index(&cfg.index, &outcome.records)?;
    report_skips(&outcome.skipped);
    println!(
        "Merged index written to {} ({} records, {} skipped)",
        cfg.index.display(),
        outcome.records.len(),
        outcome.skipped.len()
    );

    let matched = join_onto(cfg, &mut outcome.records)?;
    write_index(&cfg.index, &outcome.records)?;
    println!(
        "Spawn data joined onto {} ({} of {} records matched)",
        cfg.index.display(),
        matched,
        outcome.records.len()
    );
    Ok(())
}

/// Build the spawn map and join it onto `records`. Returns the match count.
fn join_onto(cfg: &DexConfig, records: &mut [Record]) -> Result<usize> {
    let (primary, expansion) = cfg.spawn_sources();
    let spawns = build_spawn_map(&primary, &expansion, &cfg.reserved_name())?;
    report_skips(&spawns.skipped);
    Ok(join_spawns(records, &spawns))
}

fn report_skips(skipped: &[SkippedFile]) {
    for skip in skipped {
        println!("Skipped undecodable file: {skip}");
    }
}
