//! Patch persistence backends.
//!
//! [`PatchStore`] is the single seam between the insert/extract engines and
//! physical storage. Three backends are provided:
//! - [`MemoryPatchStore`]: volatile in-memory table
//! - [`FilePatchStore`]: one file per patch in a local directory
//! - [`RemotePatchStore`]: objects in a remote bucket over HTTP
//!
//! Every backend surfaces an unwritten patch as
//! [`Error::PatchMissing`](crate::error::Error::PatchMissing); other backend
//! failures pass through unmodified.
pub mod codec;
pub mod file;
pub mod memory;
pub mod remote;

pub use file::FilePatchStore;
pub use memory::MemoryPatchStore;
pub use remote::{HttpObjectClient, ObjectClient, RemotePatchStore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::PatchIndex;
use crate::raster::Block;

/// Storage contract consumed by the insert and extract engines.
///
/// `read` must fail with `Error::PatchMissing` for a patch that was never
/// written, regardless of how the backend represents absence internally.
/// `write` replaces the stored patch wholesale; conflict resolution between
/// old and new data happens in the insert engine before the write.
pub trait PatchStore: Send + Sync {
    /// Reads the patch at `index`.
    fn read(&self, index: PatchIndex) -> Result<Block>;

    /// Persists `patch` at `index`, replacing any previous content.
    fn write(&mut self, index: PatchIndex, patch: Block) -> Result<()>;
}

/// Naming scheme deriving a patch's storage key from its index.
///
/// Only one scheme is defined. Configuration files naming an unknown scheme
/// fail to parse, so an unrecognized scheme is a configuration error and can
/// never surface at runtime.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameScheme {
    #[default]
    Default,
}

impl NameScheme {
    /// Deterministic storage key for the patch at `index`.
    pub fn key(&self, index: PatchIndex) -> String {
        match self {
            NameScheme::Default => format!("data_{}_{}.bin", index.0, index.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_keys_are_index_derived() {
        let scheme = NameScheme::default();
        assert_eq!(scheme.key(PatchIndex(0, 0)), "data_0_0.bin");
        assert_eq!(scheme.key(PatchIndex(12, 7)), "data_12_7.bin");
        assert_eq!(scheme.key(PatchIndex(-3, 4)), "data_-3_4.bin");
    }
}
