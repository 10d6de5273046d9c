//! Telemetry initialization.
//!
//! Controlled by `RUST_LOG` (standard env-filter syntax):
//! - unset → warnings only
//! - e.g. `RUST_LOG=dexmerge=debug` → per-directory collection detail
//!
//! Diagnostics go to stderr; stdout is reserved for the status lines the
//! command layer prints.

use tracing_subscriber::EnvFilter;

/// Initialize the stderr tracing subscriber. Call once, at the top of `main`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
