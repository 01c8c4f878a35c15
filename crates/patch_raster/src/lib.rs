#![forbid(unsafe_code)]
//! patch_raster: sparse patched raster storage addressed by real-world coordinates.
//!
//! A conceptually unbounded 2D raster of `f64` samples is stored as a sparse
//! grid of fixed-size square patches. Blocks of samples are inserted at
//! grid-aligned real-world coordinates and arbitrary sub-windows are extracted
//! later; writes split transparently across patch boundaries and reads merge
//! the covering patches back into one array. `NaN` marks cells that were never
//! written.
//!
//! Modules:
//! - geometry: bounding boxes and coordinate-to-patch addressing
//! - raster: block payloads plus the insert and extract engines
//! - store: the patch persistence contract and its backends (memory, file, remote)
//! - config: static store parameters and backend selection
//!
//! Overlapping writes resolve first-write-wins: a cell that already holds real
//! data keeps it, and later values for that cell are silently discarded. See
//! [`raster::PatchedRaster::insert`].
pub mod config;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod store;

/// Convenient re-exports for common types. Import with `use patch_raster::prelude::*;`.
pub mod prelude {
    pub use crate::config::{BackendKind, StoreConfig};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{BoundingBox, GridGeometry, PatchIndex};
    pub use crate::raster::{Block, Extraction, PatchedRaster};
    pub use crate::store::{
        FilePatchStore, HttpObjectClient, MemoryPatchStore, NameScheme, ObjectClient, PatchStore,
        RemotePatchStore,
    };
}
