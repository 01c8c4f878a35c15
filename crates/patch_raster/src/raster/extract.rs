//! Extract engine: gathers the patches covering a query box and slices out
//! the exact requested window.
use glam::DVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, GridGeometry, PatchIndex};
use crate::raster::Block;
use crate::store::PatchStore;

/// A window of samples cut out of the raster.
///
/// Cell `(k, l)` of `data` corresponds to the real-world coordinate
/// `origin + (k, l) * resolution`; a NaN cell was never written.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Extraction {
    /// Real-world coordinate of the window's lower-left sample.
    pub origin: DVec2,
    /// Sample step the window was extracted at.
    pub resolution: f64,
    /// The samples, x-major.
    pub data: Block,
}

impl Extraction {
    /// Real-world coordinate of the sample at `(ix, iy)`.
    pub fn coordinate_of(&self, ix: usize, iy: usize) -> DVec2 {
        self.origin + DVec2::new(ix as f64, iy as f64) * self.resolution
    }
}

/// Extracts the sub-window of samples covered by `window`.
///
/// The containment check runs before any patch read; a window protruding
/// from the outer box never touches the store. A window edge exactly on a
/// grid line includes that boundary sample (`ceil` on the lower edges); an
/// edge strictly inside a cell drops the partial cell below/left of it and
/// truncates the partial cell above/right (`trunc` on the sample counts).
pub(crate) fn extract_window(
    geometry: &GridGeometry,
    outer_box: &BoundingBox,
    store: &dyn PatchStore,
    window: &BoundingBox,
) -> Result<Extraction> {
    if !window.contained_by(outer_box) {
        return Err(Error::OutOfBounds {
            requested: *window,
            outer: *outer_box,
        });
    }

    let ps = geometry.patch_size;
    let lo = geometry.patch_index(DVec2::new(window.left, window.bottom));
    let hi = geometry.patch_index(DVec2::new(window.right, window.top));
    debug!(
        "extracting window from patches ({}, {})..=({}, {})",
        lo.0, lo.1, hi.0, hi.1
    );

    // Tile the covering patches into one contiguous array, x as the first
    // axis, ascending patch index on both axes.
    let tiles_x = (hi.0 - lo.0 + 1) as usize;
    let tiles_y = (hi.1 - lo.1 + 1) as usize;
    let mut tiled = Block::filled(tiles_x * ps, tiles_y * ps, f64::NAN);
    for ti in 0..tiles_x {
        for tj in 0..tiles_y {
            let index = PatchIndex(lo.0 + ti as i64, lo.1 + tj as i64);
            let patch = store.read(index)?;
            tiled.paste(ti * ps, tj * ps, &patch);
        }
    }

    // First in-grid sample at or above each lower window edge; sample counts
    // truncate so a partial trailing cell stays out. The f64-to-usize cast
    // truncates toward zero and clamps a negative count (window thinner than
    // one cell) to an empty axis.
    let res = geometry.resolution;
    let start = geometry.patch_start(lo);
    let i0 = ((window.left - start.x) / res).ceil() as usize;
    let j0 = ((window.bottom - start.y) / res).ceil() as usize;
    let origin = start + DVec2::new(i0 as f64, j0 as f64) * res;
    let ni = ((window.right - origin.x) / res) as usize;
    let nj = ((window.top - origin.y) / res) as usize;

    Ok(Extraction {
        origin,
        resolution: res,
        data: tiled.window(i0, j0, ni, nj),
    })
}
