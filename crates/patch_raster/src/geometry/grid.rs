//! Patch-grid addressing math.
//!
//! This module defines [`GridGeometry`] and [`PatchIndex`], mapping continuous
//! real-world coordinates to patches and local pixel offsets given an origin,
//! a resolution, and a patch edge length. All functions are pure; the
//! geometry carries no state beyond its three parameters.
use glam::DVec2;

/// Identifier for a patch in the infinite patch grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatchIndex(
    /// Patch index along the x axis.
    pub i64,
    /// Patch index along the y axis.
    pub i64,
);

/// Absolute tolerance for grid alignment checks.
const ALIGNMENT_TOLERANCE: f64 = 1e-8;

/// Coordinate-to-patch addressing for a fixed grid layout.
///
/// All index math floors, so coordinates below the origin map to negative
/// patch indices while local offsets stay in `[0, patch_size)`.
#[derive(Clone, Copy, Debug)]
pub struct GridGeometry {
    /// Real-world coordinate of the grid origin (the outer box's lower-left
    /// corner).
    pub origin: DVec2,
    /// Real-world distance covered by one sample step.
    pub resolution: f64,
    /// Samples per patch edge.
    pub patch_size: usize,
}

impl GridGeometry {
    /// Creates a new [`GridGeometry`]. Resolution and patch size must be
    /// positive; degenerate values are a caller error.
    pub fn new(origin: DVec2, resolution: f64, patch_size: usize) -> Self {
        debug_assert!(resolution > 0.0, "resolution must be > 0");
        debug_assert!(patch_size > 0, "patch_size must be > 0");
        Self {
            origin,
            resolution,
            patch_size,
        }
    }

    /// Real-world length of one patch edge.
    pub fn patch_length(&self) -> f64 {
        self.patch_size as f64 * self.resolution
    }

    /// The patch containing the real-world position `p`.
    pub fn patch_index(&self, p: DVec2) -> PatchIndex {
        let rel = (p - self.origin) / self.patch_length();
        PatchIndex(rel.x.floor() as i64, rel.y.floor() as i64)
    }

    /// Real-world coordinate of a patch's lower-left sample.
    pub fn patch_start(&self, index: PatchIndex) -> DVec2 {
        self.origin + DVec2::new(index.0 as f64, index.1 as f64) * self.patch_length()
    }

    /// Pixel position of `p` within its owning patch, in `[0, patch_size)`.
    pub fn local_index(&self, p: DVec2) -> (usize, usize) {
        let start = self.patch_start(self.patch_index(p));
        let lx = ((p.x - start.x) / self.resolution).floor();
        let ly = ((p.y - start.y) / self.resolution).floor();
        debug_assert!(lx >= 0.0 && (lx as usize) < self.patch_size);
        debug_assert!(ly >= 0.0 && (ly as usize) < self.patch_size);
        (lx as usize, ly as usize)
    }

    /// Whether both components of `p` sit on the sample grid, within a small
    /// absolute tolerance.
    pub fn is_aligned(&self, p: DVec2) -> bool {
        self.axis_aligned(p.x - self.origin.x) && self.axis_aligned(p.y - self.origin.y)
    }

    fn axis_aligned(&self, offset: f64) -> bool {
        let r = offset.rem_euclid(self.resolution);
        r <= ALIGNMENT_TOLERANCE || self.resolution - r <= ALIGNMENT_TOLERANCE
    }
}
