//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result]
//! alias. Variants cover invalid configuration, out-of-bounds queries, missing
//! patches, backend failures, and IO.
use thiserror::Error;

use crate::geometry::{BoundingBox, PatchIndex};

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested extraction window is not contained by the outer box.
    #[error("box {requested:?} is not contained by the outer box {outer:?}")]
    OutOfBounds {
        requested: BoundingBox,
        outer: BoundingBox,
    },

    /// No patch has ever been written at this index. Every backend surfaces
    /// an unwritten patch through this variant, never through its own
    /// missing-resource error.
    #[error("no patch stored at index {index:?}")]
    PatchMissing { index: PatchIndex },

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "boom"));
    }

    #[test]
    fn patch_missing_names_the_index() {
        let err = Error::PatchMissing {
            index: PatchIndex(3, -1),
        };
        assert!(err.to_string().contains("PatchIndex(3, -1)"));
    }

    #[test]
    fn out_of_bounds_reports_both_boxes() {
        let err = Error::OutOfBounds {
            requested: BoundingBox::new(-1.0, 0.0, -1.0, 0.0),
            outer: BoundingBox::new(0.0, 10.0, 0.0, 10.0),
        };
        let msg = err.to_string();
        assert!(msg.contains("not contained"));
        assert!(msg.contains("-1.0"));
    }
}
