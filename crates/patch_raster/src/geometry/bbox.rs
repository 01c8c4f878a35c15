//! Axis-aligned rectangles in real-world coordinates.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in real-world coordinates.
///
/// Callers are responsible for keeping `left <= right` and `bottom <= top`;
/// the type does not enforce it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl BoundingBox {
    /// Creates a new [`BoundingBox`] from its four edges.
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Horizontal extent (`right - left`).
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent (`top - bottom`).
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Returns `true` iff `self` lies entirely within `other`.
    ///
    /// All four edge comparisons are non-strict, so a box sharing an edge
    /// with `other` still counts as contained.
    pub fn contained_by(&self, other: &BoundingBox) -> bool {
        other.left <= self.left
            && other.bottom <= self.bottom
            && other.right >= self.right
            && other.top >= self.top
    }
}
