//! Local-directory patch files.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{codec, NameScheme, PatchStore};
use crate::error::{Error, Result};
use crate::geometry::PatchIndex;
use crate::raster::Block;

/// Patch store writing one codec file per patch into a directory.
///
/// File names come from the configured [`NameScheme`]. A missing file reads
/// as [`Error::PatchMissing`]; any other filesystem failure passes through
/// as an IO error.
pub struct FilePatchStore {
    directory: PathBuf,
    patch_size: usize,
    scheme: NameScheme,
}

impl FilePatchStore {
    /// Opens a store rooted at `directory`, creating the directory if it
    /// does not exist yet.
    pub fn new(
        directory: impl Into<PathBuf>,
        patch_size: usize,
        scheme: NameScheme,
    ) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            patch_size,
            scheme,
        })
    }

    /// The directory holding the patch files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn patch_path(&self, index: PatchIndex) -> PathBuf {
        self.directory.join(self.scheme.key(index))
    }
}

impl PatchStore for FilePatchStore {
    fn read(&self, index: PatchIndex) -> Result<Block> {
        let path = self.patch_path(index);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::PatchMissing { index });
            }
            Err(e) => return Err(e.into()),
        };
        codec::decode_patch(&bytes, self.patch_size)
    }

    fn write(&mut self, index: PatchIndex, patch: Block) -> Result<()> {
        assert_eq!(
            (patch.nx(), patch.ny()),
            (self.patch_size, self.patch_size),
            "patch shape must be patch_size x patch_size"
        );
        let path = self.patch_path(index);
        trace!("writing patch ({}, {}) to {}", index.0, index.1, path.display());
        fs::write(&path, codec::encode_patch(&patch))?;
        Ok(())
    }
}
