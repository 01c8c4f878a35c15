//! Remote object-store backend.
//!
//! Patches are objects in a remote bucket, addressed by their naming-scheme
//! key under `<endpoint>/<bucket>/`. The HTTP transport sits behind the
//! [`ObjectClient`] trait so tests can inject a fake client and never touch
//! the network.
use std::time::Duration;

use tracing::{debug, trace};

use super::{codec, NameScheme, PatchStore};
use crate::error::{Error, Result};
use crate::geometry::PatchIndex;
use crate::raster::Block;

/// Minimal byte-level object operations against a remote bucket.
///
/// `get` returns `Ok(None)` for a key that does not exist; transport and
/// server failures surface as [`Error::Backend`].
pub trait ObjectClient: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// [`ObjectClient`] over plain HTTP GET/PUT.
pub struct HttpObjectClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpObjectClient {
    /// Creates a client for the bucket at `<endpoint>/<bucket>`.
    pub fn new(endpoint: &str, bucket: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Backend(format!("failed to create HTTP client: {e}")))?;
        let base_url = format!("{}/{}", endpoint.trim_end_matches('/'), bucket);
        Ok(Self { client, base_url })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

impl ObjectClient for HttpObjectClient {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let url = self.object_url(key);
        trace!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::Backend(format!("request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        let bytes = response
            .bytes()
            .map_err(|e| Error::Backend(format!("failed to read response: {e}")))?;
        Ok(Some(bytes.to_vec()))
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let url = self.object_url(key);
        trace!("PUT {} ({} bytes)", url, bytes.len());
        let response = self
            .client
            .put(&url)
            .body(bytes.to_vec())
            .send()
            .map_err(|e| Error::Backend(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Backend(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        Ok(())
    }
}

/// Patch store backed by a remote object bucket.
///
/// Payloads use the same codec as the file backend, so a bucket can be
/// mirrored to a local directory and reopened there.
pub struct RemotePatchStore {
    client: Box<dyn ObjectClient>,
    patch_size: usize,
    scheme: NameScheme,
}

impl RemotePatchStore {
    /// Connects to the bucket at `<endpoint>/<bucket>` over HTTP.
    pub fn new(
        endpoint: &str,
        bucket: &str,
        patch_size: usize,
        scheme: NameScheme,
    ) -> Result<Self> {
        let client = Box::new(HttpObjectClient::new(endpoint, bucket)?);
        Ok(Self::with_client(client, patch_size, scheme))
    }

    /// Builds a store on top of a custom transport.
    pub fn with_client(
        client: Box<dyn ObjectClient>,
        patch_size: usize,
        scheme: NameScheme,
    ) -> Self {
        Self {
            client,
            patch_size,
            scheme,
        }
    }
}

impl PatchStore for RemotePatchStore {
    fn read(&self, index: PatchIndex) -> Result<Block> {
        let key = self.scheme.key(index);
        match self.client.get(&key)? {
            Some(bytes) => codec::decode_patch(&bytes, self.patch_size),
            None => Err(Error::PatchMissing { index }),
        }
    }

    fn write(&mut self, index: PatchIndex, patch: Block) -> Result<()> {
        assert_eq!(
            (patch.nx(), patch.ny()),
            (self.patch_size, self.patch_size),
            "patch shape must be patch_size x patch_size"
        );
        let key = self.scheme.key(index);
        debug!("uploading patch ({}, {}) as '{}'", index.0, index.1, key);
        self.client.put(&key, &codec::encode_patch(&patch))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::geometry::BoundingBox;
    use crate::raster::PatchedRaster;

    /// In-memory object bucket standing in for the HTTP transport.
    #[derive(Default)]
    struct MockObjectClient {
        objects: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl ObjectClient for MockObjectClient {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.objects.lock().unwrap().get(key).cloned())
        }

        fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_owned(), bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn write_then_read_round_trips_through_the_bucket() {
        let mut store =
            RemotePatchStore::with_client(Box::new(MockObjectClient::default()), 4, NameScheme::Default);
        let mut patch = Block::filled(4, 4, f64::NAN);
        patch.set(0, 1, 11.0);
        store.write(PatchIndex(3, 3), patch).unwrap();

        let back = store.read(PatchIndex(3, 3)).unwrap();
        assert_eq!(back.get(0, 1), 11.0);
    }

    #[test]
    fn absent_object_reads_as_patch_missing() {
        let store =
            RemotePatchStore::with_client(Box::new(MockObjectClient::default()), 4, NameScheme::Default);
        let err = store.read(PatchIndex(8, 8)).unwrap_err();
        assert!(matches!(err, Error::PatchMissing { .. }));
    }

    #[test]
    fn objects_are_keyed_by_the_naming_scheme() {
        let client = Box::new(MockObjectClient::default());
        let mut store = RemotePatchStore::with_client(client, 2, NameScheme::Default);
        store
            .write(PatchIndex(4, -2), Block::filled(2, 2, 0.0))
            .unwrap();
        // Reading through a fresh store with the same scheme finds the key.
        assert!(store.read(PatchIndex(4, -2)).is_ok());
        assert!(matches!(
            store.read(PatchIndex(-2, 4)).unwrap_err(),
            Error::PatchMissing { .. }
        ));
    }

    #[test]
    fn full_raster_runs_against_the_remote_backend() {
        let store =
            RemotePatchStore::with_client(Box::new(MockObjectClient::default()), 10, NameScheme::Default);
        let mut raster = PatchedRaster::with_store(
            BoundingBox::new(0.0, 1000.0, 0.0, 1000.0),
            1.0,
            10,
            Box::new(store),
        );
        let data = Block::from_fn(10, 20, |ix, iy| (ix * 20 + iy) as f64);
        raster.insert(5.0, 25.0, &data).unwrap();

        let out = raster
            .extract(&BoundingBox::new(4.9, 15.1, 24.9, 45.1))
            .unwrap();
        assert_eq!((out.data.nx(), out.data.ny()), (10, 20));
        for ix in 0..10 {
            for iy in 0..20 {
                assert_eq!(out.data.get(ix, iy), data.get(ix, iy));
            }
        }

        let err = raster
            .extract(&BoundingBox::new(-1.0, 5.0, 0.0, 5.0))
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }
}
