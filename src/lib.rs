//! dexmerge library crate — re-exports for integration tests.
//!
//! The primary interface is the `dexmerge` binary. This lib.rs exposes the
//! merge engine, spawn joiner, and config types so that integration tests can
//! exercise them directly without going through the CLI.

pub mod collect;
pub mod config;
pub mod error;
pub mod index;
pub mod join;
pub mod merge;
pub mod record;
pub mod telemetry;
