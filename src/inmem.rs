//! One-shot in-memory API.
//!
//! Thin wrappers over the stream drivers for callers that hold the whole
//! input in a buffer, plus a frame scanner that bounds the decompressed
//! size of a stream without decoding any block — callers can size an exact
//! output buffer before decompressing untrusted data.

use std::io::Cursor;

use crate::block::compress_bound;
use crate::error::Error;
use crate::frame::{
    block_max_size, decode_block_prefix, decode_stream_header, BLOCK_PREFIX_SIZE, FRAME_MAGIC,
    HEADER_SIZE, LEGACY_BLOCK_MAX_SIZE, LEGACY_FRAME_MAGIC,
};
use crate::io::{compress_stream, decompress_stream, CompressStats, StreamOptions};

/// Compress `data` into a fresh buffer.
pub fn compress_to_vec(
    data: &[u8],
    dictionary: &[u8],
    opts: &StreamOptions,
) -> Result<(Vec<u8>, CompressStats), Error> {
    let mut out = Vec::with_capacity(compress_bound(data.len()) / 2);
    let stats = compress_stream(&mut Cursor::new(data), &mut out, dictionary, opts)?;
    Ok((out, stats))
}

/// Decompress a whole stream into a fresh buffer.
pub fn decompress_to_vec(
    data: &[u8],
    dictionary: &[u8],
    raw_block: bool,
) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    decompress_stream(&mut Cursor::new(data), &mut out, dictionary, raw_block)?;
    Ok(out)
}

/// Upper bound on the decompressed size of a framed stream, from its block
/// prefixes alone.
///
/// Counts one maximal block per prefix; stored blocks contribute their
/// exact size.  Truncated or malformed framing is a [`Error::Format`].
pub fn max_decompressed_size(data: &[u8]) -> Result<u64, Error> {
    if data.len() >= 4 && data[..4] == LEGACY_FRAME_MAGIC {
        // Legacy: no per-stream terminator; count prefixes until EOF.
        let mut pos = 4usize;
        let mut total = 0u64;
        while pos + BLOCK_PREFIX_SIZE <= data.len() {
            let mut prefix = [0u8; BLOCK_PREFIX_SIZE];
            prefix.copy_from_slice(&data[pos..pos + BLOCK_PREFIX_SIZE]);
            let (size, _) = decode_block_prefix(&prefix);
            pos += BLOCK_PREFIX_SIZE;
            if size == 0 || pos + size > data.len() {
                return Err(Error::Format);
            }
            pos += size;
            total += LEGACY_BLOCK_MAX_SIZE as u64;
        }
        return Ok(total);
    }

    if data.len() < HEADER_SIZE || data[..4] != FRAME_MAGIC {
        return Err(Error::Format);
    }
    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&data[..HEADER_SIZE]);
    let stream = decode_stream_header(&header)?;
    let block_max = block_max_size(stream.block_max_code) as u64;

    let mut pos = HEADER_SIZE;
    let mut total = 0u64;
    loop {
        if pos + BLOCK_PREFIX_SIZE > data.len() {
            return Err(Error::Format);
        }
        let mut prefix = [0u8; BLOCK_PREFIX_SIZE];
        prefix.copy_from_slice(&data[pos..pos + BLOCK_PREFIX_SIZE]);
        let (size, uncompressed) = decode_block_prefix(&prefix);
        pos += BLOCK_PREFIX_SIZE;
        if size == 0 {
            return Ok(total);
        }
        if pos + size > data.len() {
            return Err(Error::Format);
        }
        pos += size;
        total += if uncompressed { size as u64 } else { block_max };
    }
}
