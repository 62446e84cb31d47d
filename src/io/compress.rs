//! Frame-level compression driver.
//!
//! Pulls blocks from a sequential input, runs each through the block core,
//! and writes the framed (or raw) result.  Owns the window buffer: history
//! bytes slide to the front of the buffer between dependent blocks, and a
//! dictionary seeds them before the first.

use std::io::{Read, Write};

use crate::block::{compress_bound, BlockOutcome, Compressor, Settings, HISTORY_SIZE};
use crate::config::{BLOCK_MAX_CODE_MIN, RAW_BLOCK_MAX_INPUT};
use crate::error::Error;
use crate::frame::{
    block_max_size, encode_block_prefix, encode_end_marker, encode_stream_header,
    LEGACY_BLOCK_MAX_SIZE, LEGACY_FRAME_MAGIC,
};
use crate::io::{CompressStats, StreamOptions};
use crate::stream::read_fill;

fn alloc_bytes(len: usize) -> Result<Vec<u8>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    v.resize(len, 0);
    Ok(v)
}

/// Compress `input` into `output` under `opts`, seeding history from
/// `dictionary` (empty slice for none).
pub fn compress_stream<R: Read + ?Sized, W: Write + ?Sized>(
    input: &mut R,
    output: &mut W,
    dictionary: &[u8],
    opts: &StreamOptions,
) -> Result<CompressStats, Error> {
    let legacy = opts.legacy_frames;
    // Legacy frames carry no dependence flag; blocks are always independent.
    let independent = opts.independent_blocks || legacy;
    let mut block_max_code = opts.block_max_code;
    let mut block_size = if legacy {
        LEGACY_BLOCK_MAX_SIZE
    } else {
        block_max_size(block_max_code)
    };

    let mut in_buf = alloc_bytes(HISTORY_SIZE + block_size)?;

    // Preload the first block so short inputs can shrink the block-size
    // code before the header is committed.
    let preload = read_fill(input, &mut in_buf[HISTORY_SIZE..HISTORY_SIZE + block_size])
        .map_err(Error::SourceRead)?;
    let mut eof = preload < block_size;
    let mut preloaded = preload;

    if !legacy && preloaded < block_size {
        while block_max_code > BLOCK_MAX_CODE_MIN
            && block_max_size(block_max_code - 1) >= preloaded
        {
            block_max_code -= 1;
        }
        block_size = block_max_size(block_max_code);
    }

    // Sized so a legacy block can always be emitted, even when it expands.
    let mut out_buf = alloc_bytes(compress_bound(block_size))?;

    let mut compressor = Compressor::new(
        HISTORY_SIZE + block_size,
        Settings {
            favor_ratio: opts.favor_ratio,
            raw_mode: opts.raw_block,
        },
    )?;

    let mut stats = CompressStats::default();

    if !opts.raw_block {
        if legacy {
            output
                .write_all(&LEGACY_FRAME_MAGIC)
                .map_err(Error::SinkWrite)?;
            stats.compressed_size += LEGACY_FRAME_MAGIC.len() as u64;
        } else {
            let header = encode_stream_header(block_max_code, independent);
            output.write_all(&header).map_err(Error::SinkWrite)?;
            stats.compressed_size += header.len() as u64;
        }
    }
    stats.block_max_code = block_max_code;

    let mut prev_block_size = 0usize;
    let mut num_blocks = 0usize;
    let mut dict_active = !dictionary.is_empty();

    while preloaded > 0 || !eof {
        if prev_block_size > 0 {
            // Keep the tail of the previous block as history.  Any block
            // with a successor is a full one, so its data ends at the
            // buffer's block boundary.
            in_buf.copy_within(
                HISTORY_SIZE + block_size - prev_block_size..HISTORY_SIZE + block_size,
                HISTORY_SIZE - prev_block_size,
            );
        } else if dict_active {
            let d = dictionary.len().min(HISTORY_SIZE);
            in_buf[HISTORY_SIZE - d..HISTORY_SIZE]
                .copy_from_slice(&dictionary[dictionary.len() - d..]);
            prev_block_size = d;
        }

        let in_size = if preloaded > 0 {
            let n = preloaded;
            preloaded = 0;
            n
        } else {
            let n = read_fill(input, &mut in_buf[HISTORY_SIZE..HISTORY_SIZE + block_size])
                .map_err(Error::SourceRead)?;
            if n < block_size {
                eof = true;
            }
            n
        };

        if in_size == 0 {
            continue;
        }

        if opts.raw_block && (num_blocks > 0 || in_size > RAW_BLOCK_MAX_INPUT) {
            return Err(Error::RawTooLarge);
        }
        if !independent {
            dict_active = false;
        }

        let window_start = HISTORY_SIZE - prev_block_size;
        let window_end = HISTORY_SIZE + in_size;
        // Modern frames fall back to a stored block when the commands do
        // not fit the input size; legacy frames have no stored-block
        // encoding, so they get bound-sized room and always emit.
        let max_out = if legacy { out_buf.len() } else { in_size };

        let outcome = compressor.shrink_block(
            &in_buf[window_start..window_end],
            prev_block_size,
            in_size,
            &mut out_buf[..max_out],
        )?;

        match outcome {
            BlockOutcome::Compressed(out_size) => {
                if !opts.raw_block {
                    output
                        .write_all(&encode_block_prefix(out_size, false))
                        .map_err(Error::SinkWrite)?;
                    stats.compressed_size += 4;
                }
                output
                    .write_all(&out_buf[..out_size])
                    .map_err(Error::SinkWrite)?;
                stats.compressed_size += out_size as u64;
            }
            BlockOutcome::Incompressible => {
                if opts.raw_block {
                    return Err(Error::RawIncompressible);
                }
                debug_assert!(!legacy, "legacy output buffer is bound-sized");
                output
                    .write_all(&encode_block_prefix(in_size, true))
                    .map_err(Error::SinkWrite)?;
                output
                    .write_all(&in_buf[HISTORY_SIZE..HISTORY_SIZE + in_size])
                    .map_err(Error::SinkWrite)?;
                stats.compressed_size += 4 + in_size as u64;
            }
        }

        stats.original_size += in_size as u64;
        num_blocks += 1;

        prev_block_size = if independent {
            0
        } else {
            in_size.min(HISTORY_SIZE)
        };

        if !eof {
            crate::displaylevel!(
                3,
                "\r{} => {} ({:.2} %)",
                stats.original_size,
                stats.compressed_size,
                stats.compressed_size as f64 * 100.0 / stats.original_size as f64
            );
        }
    }

    if !opts.raw_block && !legacy {
        output
            .write_all(&encode_end_marker())
            .map_err(Error::SinkWrite)?;
        stats.compressed_size += 4;
    }
    output.flush().map_err(Error::SinkWrite)?;

    stats.command_count = compressor.command_count();
    Ok(stats)
}
