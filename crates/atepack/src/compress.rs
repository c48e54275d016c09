//! Pre-encryption compression.

use std::io::Read;

use flate2::read::DeflateEncoder;
use flate2::Compression;

use crate::{Error, Result};

/// Compress data with raw DEFLATE (no zlib framing, as ZIP requires).
pub fn compress_deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(data, Compression::default());

    let mut output = Vec::with_capacity(data.len() / 2);
    encoder
        .read_to_end(&mut output)
        .map_err(|e| Error::Compression(e.to_string()))?;

    Ok(output)
}
