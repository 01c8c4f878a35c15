//! Byte-level patch payload codec shared by the file and remote backends.
//!
//! Layout: 4-byte magic `PRAS`, u32 format version, u32 patch edge length,
//! then `edge * edge` little-endian f64 cells in x-major order.
use crate::error::{Error, Result};
use crate::raster::Block;

const MAGIC: &[u8; 4] = b"PRAS";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 12;

/// Encodes a square patch into the on-disk/on-wire byte layout.
pub(crate) fn encode_patch(patch: &Block) -> Vec<u8> {
    debug_assert_eq!(patch.nx(), patch.ny(), "patches are square");
    let edge = patch.nx() as u32;
    let mut buf = Vec::with_capacity(HEADER_LEN + patch.cells().len() * 8);
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&edge.to_le_bytes());
    for cell in patch.cells() {
        buf.extend_from_slice(&cell.to_le_bytes());
    }
    buf
}

/// Decodes a patch payload, verifying the header against `patch_size`.
pub(crate) fn decode_patch(bytes: &[u8], patch_size: usize) -> Result<Block> {
    if bytes.len() < HEADER_LEN || &bytes[0..4] != MAGIC {
        return Err(Error::Backend("patch payload has no valid header".into()));
    }
    let version = read_u32(&bytes[4..8]);
    if version != VERSION {
        return Err(Error::Backend(format!(
            "unsupported patch payload version {version}"
        )));
    }
    let edge = read_u32(&bytes[8..12]) as usize;
    if edge != patch_size {
        return Err(Error::Backend(format!(
            "stored patch edge {edge} does not match configured patch size {patch_size}"
        )));
    }
    let expected = HEADER_LEN + edge * edge * 8;
    if bytes.len() != expected {
        return Err(Error::Backend(format!(
            "patch payload is {} bytes, expected {expected}",
            bytes.len()
        )));
    }
    let cells = bytes[HEADER_LEN..]
        .chunks_exact(8)
        .map(read_f64)
        .collect();
    Ok(Block::from_vec(edge, edge, cells))
}

fn read_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn read_f64(b: &[u8]) -> f64 {
    f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}
