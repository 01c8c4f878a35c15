//! In-memory patch table.
use std::collections::HashMap;

use super::PatchStore;
use crate::error::{Error, Result};
use crate::geometry::PatchIndex;
use crate::raster::Block;

/// Sparse in-memory patch table.
///
/// Patches live in a hash map keyed by [`PatchIndex`], so negative indices
/// are as addressable as positive ones. Nothing outlives the value.
#[derive(Debug)]
pub struct MemoryPatchStore {
    patch_size: usize,
    patches: HashMap<PatchIndex, Block>,
}

impl MemoryPatchStore {
    /// Creates an empty store for patches of `patch_size` by `patch_size`
    /// cells.
    pub fn new(patch_size: usize) -> Self {
        Self {
            patch_size,
            patches: HashMap::new(),
        }
    }

    /// Number of patches currently stored.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Returns `true` if no patch has been written yet.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl PatchStore for MemoryPatchStore {
    fn read(&self, index: PatchIndex) -> Result<Block> {
        self.patches
            .get(&index)
            .cloned()
            .ok_or(Error::PatchMissing { index })
    }

    fn write(&mut self, index: PatchIndex, patch: Block) -> Result<()> {
        assert_eq!(
            (patch.nx(), patch.ny()),
            (self.patch_size, self.patch_size),
            "patch shape must be patch_size x patch_size"
        );
        self.patches.insert(index, patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_of_unwritten_patch_is_missing() {
        let store = MemoryPatchStore::new(4);
        let err = store.read(PatchIndex(1, 2)).unwrap_err();
        assert!(matches!(
            err,
            Error::PatchMissing {
                index: PatchIndex(1, 2)
            }
        ));
    }

    #[test]
    fn write_then_read_returns_the_patch() {
        let mut store = MemoryPatchStore::new(4);
        let mut patch = Block::filled(4, 4, f64::NAN);
        patch.set(2, 2, 9.0);
        store.write(PatchIndex(-1, 3), patch.clone()).unwrap();

        assert_eq!(store.len(), 1);
        let back = store.read(PatchIndex(-1, 3)).unwrap();
        assert_eq!(back.get(2, 2), 9.0);
        assert!(!back.is_defined(0, 0));
    }

    #[test]
    fn write_replaces_previous_content() {
        let mut store = MemoryPatchStore::new(2);
        store
            .write(PatchIndex(0, 0), Block::filled(2, 2, 1.0))
            .unwrap();
        store
            .write(PatchIndex(0, 0), Block::filled(2, 2, 2.0))
            .unwrap();
        assert_eq!(store.read(PatchIndex(0, 0)).unwrap().get(0, 0), 2.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    #[should_panic(expected = "patch shape")]
    fn wrongly_shaped_patch_is_fatal() {
        let mut store = MemoryPatchStore::new(4);
        let _ = store.write(PatchIndex(0, 0), Block::filled(3, 4, 0.0));
    }
}
