//! Compression and integrity hashing for the prospect blob.
//!
//! Pure transforms over byte buffers. The digest is a content
//! fingerprint over the uncompressed bytes, so it stays valid no matter
//! what the compressor emits; it is not a security measure.

use crate::error::{ProspectError, ProspectResult};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Compresses `raw` as a zlib stream (header and checksum included) at
/// the default level.
pub fn compress(raw: &[u8]) -> ProspectResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    Ok(encoder.finish()?)
}

/// Decompresses a zlib stream produced by [`compress`].
pub fn decompress(compressed: &[u8]) -> ProspectResult<Vec<u8>> {
    let mut raw = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut raw)
        .map_err(|e| ProspectError::CorruptBlob(e.to_string()))?;
    Ok(raw)
}

/// SHA-1 of `raw` as 40 lowercase hex characters.
pub fn digest(raw: &[u8]) -> String {
    hex::encode(Sha1::digest(raw))
}

#[cfg(test)]
#[path = "tests/blob_tests.rs"]
mod tests;
