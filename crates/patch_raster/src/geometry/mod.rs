//! Spatial primitives: bounding boxes and patch-grid addressing.
pub mod bbox;
pub mod grid;

pub use bbox::BoundingBox;
pub use grid::{GridGeometry, PatchIndex};
