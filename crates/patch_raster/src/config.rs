//! Static store configuration: grid geometry parameters plus backend
//! selection.
//!
//! A [`StoreConfig`] is created once and treated as immutable for the
//! lifetime of any raster opened from it. With the `serde` feature enabled
//! it can be loaded from JSON, where the backend is selected by a `mode`
//! field (`memory`, `file`, or `remote`).
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::raster::PatchedRaster;
use crate::store::{FilePatchStore, MemoryPatchStore, NameScheme, PatchStore, RemotePatchStore};

/// Which patch backend a [`StoreConfig`] opens.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
#[derive(Clone, Debug, PartialEq)]
pub enum BackendKind {
    /// Volatile in-memory table.
    Memory,
    /// One file per patch under `directory`.
    File { directory: PathBuf },
    /// Objects in a remote bucket reachable over HTTP.
    Remote { endpoint: String, bucket: String },
}

/// Immutable store parameters, created once per store lifetime.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Real-world rectangle the store is allowed to span.
    pub outer_box: BoundingBox,
    /// Real-world distance per sample step.
    pub resolution: f64,
    /// Samples per patch edge.
    pub patch_size: usize,
    /// Backend selection and its parameters.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub backend: BackendKind,
    /// Patch naming scheme used by the file and remote backends.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name_scheme: NameScheme,
}

impl StoreConfig {
    /// Creates a configuration with the default naming scheme.
    pub fn new(
        outer_box: BoundingBox,
        resolution: f64,
        patch_size: usize,
        backend: BackendKind,
    ) -> Self {
        Self {
            outer_box,
            resolution,
            patch_size,
            backend,
            name_scheme: NameScheme::Default,
        }
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(Error::InvalidConfig("resolution must be > 0".into()));
        }
        if self.patch_size == 0 {
            return Err(Error::InvalidConfig("patch_size must be > 0".into()));
        }
        if self.outer_box.left > self.outer_box.right
            || self.outer_box.bottom > self.outer_box.top
        {
            return Err(Error::InvalidConfig(
                "outer_box must have left <= right and bottom <= top".into(),
            ));
        }
        if let BackendKind::Remote { endpoint, bucket } = &self.backend {
            if endpoint.is_empty() || bucket.is_empty() {
                return Err(Error::InvalidConfig(
                    "remote backend needs endpoint and bucket".into(),
                ));
            }
        }
        Ok(())
    }

    /// Validates the configuration and opens the selected backend, returning
    /// a ready [`PatchedRaster`].
    pub fn open(&self) -> Result<PatchedRaster> {
        self.validate()?;
        let store: Box<dyn PatchStore> = match &self.backend {
            BackendKind::Memory => Box::new(MemoryPatchStore::new(self.patch_size)),
            BackendKind::File { directory } => Box::new(FilePatchStore::new(
                directory.clone(),
                self.patch_size,
                self.name_scheme,
            )?),
            BackendKind::Remote { endpoint, bucket } => Box::new(RemotePatchStore::new(
                endpoint,
                bucket,
                self.patch_size,
                self.name_scheme,
            )?),
        };
        Ok(PatchedRaster::with_store(
            self.outer_box,
            self.resolution,
            self.patch_size,
            store,
        ))
    }
}

#[cfg(feature = "serde")]
impl StoreConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Loads a configuration from a JSON file.
    ///
    /// A relative file-backend directory is resolved against the config
    /// file's parent directory, so a config can sit next to its data.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        if let BackendKind::File { directory } = &mut config.backend {
            if directory.is_relative() {
                if let Some(parent) = path.parent() {
                    let resolved = parent.join(directory.as_path());
                    *directory = resolved;
                }
            }
        }
        Ok(config)
    }
}
