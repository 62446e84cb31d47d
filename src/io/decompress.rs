//! Frame-level decompression driver.
//!
//! Reads a modern or legacy frame (or a raw block), expands each block with
//! the verification decoder, and writes the result sequentially.  The block
//! history slides through the same window layout the compressor uses, so
//! dependent streams and dictionary streams decode symmetrically.

use std::io::{Read, Write};

use crate::block::{compress_bound, expand_block, HISTORY_SIZE};
use crate::config::RAW_BLOCK_MAX_INPUT;
use crate::error::Error;
use crate::frame::{
    block_max_size, decode_block_prefix, decode_stream_header, StreamHeader, BLOCK_PREFIX_SIZE,
    FRAME_MAGIC, HEADER_SIZE, LEGACY_BLOCK_MAX_SIZE, LEGACY_FRAME_MAGIC,
};
use crate::io::DecompressStats;
use crate::stream::read_fill;

fn alloc_bytes(len: usize) -> Result<Vec<u8>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    v.resize(len, 0);
    Ok(v)
}

/// Decompress a raw (unframed) single block, trailing end marker included.
fn decompress_raw<R: Read + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    output: &mut W,
    dictionary: &[u8],
) -> Result<DecompressStats, Error> {
    let mut data = Vec::new();
    input.read_to_end(&mut data).map_err(Error::SourceRead)?;
    // The two-byte end marker belongs to the compressed stream but not to
    // the block payload.
    if data.len() < 2 {
        return Err(Error::Format);
    }
    let payload = &data[..data.len() - 2];
    if payload.len() > compress_bound(RAW_BLOCK_MAX_INPUT) {
        return Err(Error::Format);
    }

    let mut out_buf = alloc_bytes(HISTORY_SIZE + RAW_BLOCK_MAX_INPUT)?;
    let d = dictionary.len().min(HISTORY_SIZE);
    out_buf[HISTORY_SIZE - d..HISTORY_SIZE].copy_from_slice(&dictionary[dictionary.len() - d..]);

    let decoded = expand_block(payload, &mut out_buf, HISTORY_SIZE, RAW_BLOCK_MAX_INPUT)?;
    output
        .write_all(&out_buf[HISTORY_SIZE..HISTORY_SIZE + decoded])
        .map_err(Error::SinkWrite)?;
    output.flush().map_err(Error::SinkWrite)?;

    Ok(DecompressStats {
        original_size: decoded as u64,
        compressed_size: data.len() as u64,
    })
}

/// Decompress a framed stream (modern or legacy, detected from the magic).
pub fn decompress_stream<R: Read + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    output: &mut W,
    dictionary: &[u8],
    raw_block: bool,
) -> Result<DecompressStats, Error> {
    if raw_block {
        return decompress_raw(input, output, dictionary);
    }

    // Magic first; it selects the header flavour.
    let mut magic = [0u8; 4];
    if read_fill(input, &mut magic).map_err(Error::SourceRead)? != 4 {
        return Err(Error::Format);
    }

    let mut stats = DecompressStats::default();
    let header: StreamHeader = if magic == FRAME_MAGIC {
        let mut rest = [0u8; HEADER_SIZE - 4];
        if read_fill(input, &mut rest).map_err(Error::SourceRead)? != rest.len() {
            return Err(Error::Format);
        }
        let mut full = [0u8; HEADER_SIZE];
        full[..4].copy_from_slice(&magic);
        full[4..].copy_from_slice(&rest);
        stats.compressed_size += HEADER_SIZE as u64;
        decode_stream_header(&full)?
    } else if magic == LEGACY_FRAME_MAGIC {
        stats.compressed_size += magic.len() as u64;
        StreamHeader {
            block_max_code: 0,
            independent_blocks: true,
            legacy: true,
        }
    } else {
        return Err(Error::Format);
    };

    let block_max = if header.legacy {
        LEGACY_BLOCK_MAX_SIZE
    } else {
        block_max_size(header.block_max_code)
    };

    // Legacy blocks may expand past the block size (there is no stored-
    // block encoding), so the input buffer gets bound-sized headroom.
    let mut in_buf = alloc_bytes(compress_bound(block_max))?;
    let mut out_buf = alloc_bytes(HISTORY_SIZE + block_max)?;

    let mut prev = 0usize;
    let mut dict_active = !dictionary.is_empty();

    loop {
        if prev > 0 {
            out_buf.copy_within(
                HISTORY_SIZE + block_max - prev..HISTORY_SIZE + block_max,
                HISTORY_SIZE - prev,
            );
        } else if dict_active {
            let d = dictionary.len().min(HISTORY_SIZE);
            out_buf[HISTORY_SIZE - d..HISTORY_SIZE]
                .copy_from_slice(&dictionary[dictionary.len() - d..]);
            prev = d;
            if !header.independent_blocks {
                dict_active = false;
            }
        }

        let mut prefix = [0u8; BLOCK_PREFIX_SIZE];
        if read_fill(input, &mut prefix).map_err(Error::SourceRead)? != BLOCK_PREFIX_SIZE {
            // Legacy streams end at EOF; modern ones should have ended at
            // the zero marker, but a clean EOF is accepted the same way.
            break;
        }
        let (block_size, is_uncompressed) = decode_block_prefix(&prefix);
        if block_size == 0 {
            stats.compressed_size += BLOCK_PREFIX_SIZE as u64;
            break;
        }
        if block_size > in_buf.len() {
            return Err(Error::Format);
        }
        stats.compressed_size += BLOCK_PREFIX_SIZE as u64;

        if read_fill(input, &mut in_buf[..block_size]).map_err(Error::SourceRead)? != block_size
        {
            // Truncated block: treat like end-of-stream, same as a short
            // prefix read.
            break;
        }
        stats.compressed_size += block_size as u64;

        let decoded = if is_uncompressed {
            if block_size > block_max {
                return Err(Error::Format);
            }
            out_buf[HISTORY_SIZE..HISTORY_SIZE + block_size]
                .copy_from_slice(&in_buf[..block_size]);
            block_size
        } else {
            expand_block(&in_buf[..block_size], &mut out_buf, HISTORY_SIZE, block_max)?
        };

        if decoded > 0 {
            output
                .write_all(&out_buf[HISTORY_SIZE..HISTORY_SIZE + decoded])
                .map_err(Error::SinkWrite)?;
            stats.original_size += decoded as u64;
        }

        prev = if header.independent_blocks {
            0
        } else {
            decoded.min(HISTORY_SIZE)
        };
    }

    output.flush().map_err(Error::SinkWrite)?;
    Ok(stats)
}
