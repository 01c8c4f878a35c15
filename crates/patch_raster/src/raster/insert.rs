//! Insert engine: splits aligned blocks along patch boundaries and merges
//! them into their owning patches.
use glam::DVec2;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::GridGeometry;
use crate::raster::Block;
use crate::store::PatchStore;

/// Recursively inserts `data` with its lower-left sample at `origin`.
///
/// The recursion splits along x first, then y; each level re-derives both
/// corner patches on a strictly smaller block, so a block spanning both axes
/// terminates after peeling one axis at a time. Once a block fits a single
/// patch it is placed into a NaN-filled patch buffer, merged against whatever
/// the store already holds, and written back.
///
/// # Panics
///
/// Panics if `origin` is not aligned to the sample grid, if `data` is empty,
/// or if a split offset lands on a degenerate boundary; all three indicate
/// inconsistent geometry on the caller's side.
pub(crate) fn insert_block(
    geometry: &GridGeometry,
    store: &mut dyn PatchStore,
    origin: DVec2,
    data: &Block,
) -> Result<()> {
    assert!(!data.is_empty(), "inserted block must not be empty");
    assert!(
        geometry.is_aligned(origin),
        "insert origin ({}, {}) is not aligned to the sample grid",
        origin.x,
        origin.y
    );

    let res = geometry.resolution;
    let upper = origin
        + DVec2::new(
            res * (data.nx() - 1) as f64,
            res * (data.ny() - 1) as f64,
        );
    let p0 = geometry.patch_index(origin);
    let p1 = geometry.patch_index(upper);

    if p0.0 < p1.0 {
        // Peel everything left of the right-most patch column; the left part
        // recurses again until single columns remain.
        let sx = geometry.patch_start(p1).x;
        let split = ((sx - origin.x) / res).round() as usize;
        assert!(
            split > 0 && split < data.nx(),
            "x split index {split} outside the open interval (0, {})",
            data.nx()
        );
        debug!(
            "splitting {}x{} block at x offset {split}",
            data.nx(),
            data.ny()
        );
        insert_block(geometry, store, origin, &data.slice_x(0..split))?;
        insert_block(
            geometry,
            store,
            DVec2::new(sx, origin.y),
            &data.slice_x(split..data.nx()),
        )?;
    } else if p0.1 < p1.1 {
        let sy = geometry.patch_start(p1).y;
        let split = ((sy - origin.y) / res).round() as usize;
        assert!(
            split > 0 && split < data.ny(),
            "y split index {split} outside the open interval (0, {})",
            data.ny()
        );
        debug!(
            "splitting {}x{} block at y offset {split}",
            data.nx(),
            data.ny()
        );
        insert_block(geometry, store, origin, &data.slice_y(0..split))?;
        insert_block(
            geometry,
            store,
            DVec2::new(origin.x, sy),
            &data.slice_y(split..data.ny()),
        )?;
    } else {
        let (lx, ly) = geometry.local_index(origin);
        let mut patch = Block::filled(geometry.patch_size, geometry.patch_size, f64::NAN);
        patch.paste(lx, ly, data);
        let merged = match store.read(p0) {
            Ok(existing) => merge_preserving_existing(patch, &existing),
            Err(Error::PatchMissing { .. }) => patch,
            Err(e) => return Err(e),
        };
        trace!("storing patch ({}, {})", p0.0, p0.1);
        store.write(p0, merged)?;
    }
    Ok(())
}

/// Keeps every already-defined cell of `existing`; incoming values only land
/// in cells that were still unset. Later writes to a written cell are
/// silently discarded (first write wins).
fn merge_preserving_existing(mut incoming: Block, existing: &Block) -> Block {
    for (cell, old) in incoming.cells_mut().iter_mut().zip(existing.cells()) {
        if !old.is_nan() {
            *cell = *old;
        }
    }
    incoming
}
