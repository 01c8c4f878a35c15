//! Patched raster storage: insert and extract over a patch store.
//!
//! [`PatchedRaster`] couples the immutable [`GridGeometry`] with a
//! [`PatchStore`] and exposes the two core operations: inserting blocks of
//! samples at aligned real-world coordinates and extracting arbitrary
//! sub-windows. Both split and merge transparently across patch boundaries.
pub mod block;
pub mod extract;
pub mod insert;

pub use block::Block;
pub use extract::Extraction;

use glam::DVec2;

use crate::error::Result;
use crate::geometry::{BoundingBox, GridGeometry};
use crate::store::{MemoryPatchStore, PatchStore};

/// A conceptually unbounded 2D raster stored as fixed-size square patches.
///
/// The raster holds no cache and no mutable state between calls other than
/// the geometry it was created with; all persistence lives behind the
/// [`PatchStore`]. Every call is synchronous, and one read or write is
/// issued per patch touched.
pub struct PatchedRaster {
    geometry: GridGeometry,
    outer_box: BoundingBox,
    store: Box<dyn PatchStore>,
}

impl PatchedRaster {
    /// Creates a raster over an existing patch store.
    pub fn with_store(
        outer_box: BoundingBox,
        resolution: f64,
        patch_size: usize,
        store: Box<dyn PatchStore>,
    ) -> Self {
        let origin = DVec2::new(outer_box.left, outer_box.bottom);
        Self {
            geometry: GridGeometry::new(origin, resolution, patch_size),
            outer_box,
            store,
        }
    }

    /// Creates a raster over a fresh in-memory store.
    pub fn in_memory(outer_box: BoundingBox, resolution: f64, patch_size: usize) -> Self {
        let store = Box::new(MemoryPatchStore::new(patch_size));
        Self::with_store(outer_box, resolution, patch_size, store)
    }

    /// The grid geometry shared by all operations.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The declared real-world rectangle the store may span.
    pub fn outer_box(&self) -> &BoundingBox {
        &self.outer_box
    }

    /// Sample step in real-world units.
    pub fn resolution(&self) -> f64 {
        self.geometry.resolution
    }

    /// Inserts a block whose lower-left sample lands at `(x0, y0)`.
    ///
    /// The block is split along patch boundaries and merged into every patch
    /// it overlaps. Cells already holding data keep their stored value and
    /// the incoming value is discarded: the first write to a cell wins, by
    /// design. Re-inserting an identical block is therefore a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `(x0, y0)` is not aligned to the sample grid or `data` is
    /// empty; both indicate inconsistent geometry on the caller's side.
    pub fn insert(&mut self, x0: f64, y0: f64, data: &Block) -> Result<()> {
        insert::insert_block(&self.geometry, self.store.as_mut(), DVec2::new(x0, y0), data)
    }

    /// Extracts the sub-window of samples covered by `window`.
    ///
    /// Fails with [`Error::OutOfBounds`](crate::error::Error::OutOfBounds)
    /// if `window` is not contained by the outer box, and with
    /// [`Error::PatchMissing`](crate::error::Error::PatchMissing) if a
    /// covering patch was never written.
    pub fn extract(&self, window: &BoundingBox) -> Result<Extraction> {
        extract::extract_window(&self.geometry, &self.outer_box, self.store.as_ref(), window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(nx: usize, ny: usize) -> Block {
        Block::from_fn(nx, ny, |ix, iy| (ix * ny + iy) as f64)
    }

    fn extract_all_defined(raster: &PatchedRaster, window: &BoundingBox) -> Block {
        let out = raster.extract(window).unwrap();
        out.data
    }

    #[test]
    fn insert_then_extract_round_trips_across_patches() {
        let mut raster =
            PatchedRaster::in_memory(BoundingBox::new(0.0, 1000.0, 0.0, 1000.0), 1.0, 10);
        // Spans both axes: 24x14 from (5, 5) covers patches (0..=2, 0..=1).
        let data = ramp(24, 14);
        raster.insert(5.0, 5.0, &data).unwrap();

        let out = raster
            .extract(&BoundingBox::new(4.9, 29.5, 4.9, 19.5))
            .unwrap();
        assert_eq!(out.origin.x, 5.0);
        assert_eq!(out.origin.y, 5.0);
        assert_eq!((out.data.nx(), out.data.ny()), (24, 14));
        for ix in 0..24 {
            for iy in 0..14 {
                assert_eq!(out.data.get(ix, iy), data.get(ix, iy));
            }
        }
    }

    #[test]
    fn reinserting_the_same_block_is_idempotent() {
        let mut raster =
            PatchedRaster::in_memory(BoundingBox::new(0.0, 1000.0, 0.0, 1000.0), 1.0, 10);
        let data = ramp(12, 8);
        raster.insert(3.0, 4.0, &data).unwrap();
        let window = BoundingBox::new(2.9, 14.1, 3.9, 11.1);
        let first = extract_all_defined(&raster, &window);

        raster.insert(3.0, 4.0, &data).unwrap();
        let second = extract_all_defined(&raster, &window);
        assert_eq!(first, second);
    }

    #[test]
    fn first_write_wins_on_overlap() {
        let mut raster =
            PatchedRaster::in_memory(BoundingBox::new(0.0, 1000.0, 0.0, 1000.0), 1.0, 10);
        let a = Block::filled(6, 6, 1.0);
        let b = Block::filled(6, 6, 2.0);
        raster.insert(2.0, 2.0, &a).unwrap();
        // Overlaps a's upper-right 3x3 quadrant.
        raster.insert(5.0, 5.0, &b).unwrap();

        let out = raster
            .extract(&BoundingBox::new(1.9, 11.1, 1.9, 11.1))
            .unwrap();
        // Everywhere a wrote, a's value survives.
        for ix in 0..6 {
            for iy in 0..6 {
                assert_eq!(out.data.get(ix, iy), 1.0, "a's cell ({ix}, {iy})");
            }
        }
        // b only populated the cells a never touched.
        assert_eq!(out.data.get(7, 7), 2.0);
        assert_eq!(out.data.get(3, 7), 2.0);
        assert_eq!(out.data.get(7, 3), 2.0);
        // Outside both blocks: never written.
        assert!(!out.data.is_defined(8, 0));
    }

    #[test]
    fn overlapping_insert_order_decides_the_survivor() {
        let mut raster =
            PatchedRaster::in_memory(BoundingBox::new(0.0, 1000.0, 0.0, 1000.0), 1.0, 10);
        let b = Block::filled(6, 6, 2.0);
        let a = Block::filled(6, 6, 1.0);
        raster.insert(5.0, 5.0, &b).unwrap();
        raster.insert(2.0, 2.0, &a).unwrap();

        let out = raster
            .extract(&BoundingBox::new(4.9, 10.1, 4.9, 10.1))
            .unwrap();
        // b came first, so b's values win across the overlap.
        for ix in 0..3 {
            for iy in 0..3 {
                assert_eq!(out.data.get(ix, iy), 2.0);
            }
        }
    }

    #[test]
    fn file_backend_matches_the_memory_backend_scenario() {
        use crate::store::{FilePatchStore, NameScheme};

        let dir = tempfile::TempDir::new().unwrap();
        let store = FilePatchStore::new(dir.path(), 100, NameScheme::Default).unwrap();
        let mut raster = PatchedRaster::with_store(
            BoundingBox::new(0.0, 10000.0, 0.0, 10000.0),
            10.0,
            100,
            Box::new(store),
        );
        let data = ramp(4, 5);
        raster.insert(20.0, 20.0, &data).unwrap();

        let out = raster
            .extract(&BoundingBox::new(19.0, 61.0, 19.0, 71.0))
            .unwrap();
        assert_eq!(out.origin, DVec2::new(20.0, 20.0));
        assert_eq!((out.data.nx(), out.data.ny()), (4, 5));
        for ix in 0..4 {
            for iy in 0..5 {
                assert_eq!(out.data.get(ix, iy), data.get(ix, iy));
            }
        }

        let err = raster
            .extract(&BoundingBox::new(10.0, 9e10, 10.0, 100.0))
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::OutOfBounds { .. }));
    }

    #[test]
    fn geometry_accessors_reflect_the_configuration() {
        let outer = BoundingBox::new(-100.0, 100.0, -50.0, 50.0);
        let raster = PatchedRaster::in_memory(outer, 0.5, 64);
        assert_eq!(raster.resolution(), 0.5);
        assert_eq!(raster.outer_box(), &outer);
        assert_eq!(raster.geometry().origin, DVec2::new(-100.0, -50.0));
        assert_eq!(raster.geometry().patch_length(), 32.0);
    }
}
