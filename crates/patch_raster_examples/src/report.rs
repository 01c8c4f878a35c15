//! Shared helpers for the example binaries.
use patch_raster::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a stdout tracing subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// One-line summary of an extraction for terminal output.
pub fn summarize(label: &str, out: &Extraction) -> String {
    let total = out.data.nx() * out.data.ny();
    format!(
        "{label}: {}x{} samples at ({}, {}), {} defined / {} total",
        out.data.nx(),
        out.data.ny(),
        out.origin.x,
        out.origin.y,
        out.data.defined_cells(),
        total
    )
}
