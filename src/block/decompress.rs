//! Verification block decoder.
//!
//! A straightforward, fully bounds-checked LZ4 block decoder used to verify
//! the compressor's output and to implement the `-d` command.  It favours
//! clarity over throughput: production decompression should use an optimised
//! decoder; this one's job is to be an obviously-correct oracle.
//!
//! Malformed input of any shape returns an error — the decoder never panics
//! and never writes outside the provided output range.

use super::types::{LITERALS_RUN_LEN, MATCH_RUN_LEN, MIN_MATCH};
use crate::error::Error;

#[inline]
fn read_varlen(input: &[u8], pos: &mut usize, base: usize) -> Result<usize, Error> {
    let mut len = base;
    loop {
        let byte = *input.get(*pos).ok_or(Error::InternalDecompression)?;
        *pos += 1;
        len += byte as usize;
        if byte != 255 {
            return Ok(len);
        }
        // A malicious chain of 255s cannot push past the output bound
        // because every use of the length re-checks it, but cap the
        // accumulator so it cannot overflow on absurd inputs.
        if len > u32::MAX as usize {
            return Err(Error::InternalDecompression);
        }
    }
}

/// Decompress one block.
///
/// `out[..out_start)` holds previously decompressed history the block's
/// matches may reference; decoded bytes are written to
/// `out[out_start..out_start + block_max_size)`.  Returns the number of
/// decoded bytes.
pub fn expand_block(
    input: &[u8],
    out: &mut [u8],
    out_start: usize,
    block_max_size: usize,
) -> Result<usize, Error> {
    let out_end = out_start
        .checked_add(block_max_size)
        .filter(|&e| e <= out.len())
        .ok_or(Error::InternalDecompression)?;

    let mut in_pos = 0usize;
    let mut out_pos = out_start;

    while in_pos < input.len() {
        let token = input[in_pos] as usize;
        in_pos += 1;

        // Literals.
        let mut literals = token >> 4;
        if literals == LITERALS_RUN_LEN {
            literals = read_varlen(input, &mut in_pos, literals)?;
        }
        if in_pos + literals > input.len() || out_pos + literals > out_end {
            return Err(Error::InternalDecompression);
        }
        out[out_pos..out_pos + literals].copy_from_slice(&input[in_pos..in_pos + literals]);
        in_pos += literals;
        out_pos += literals;

        // The final command carries no match: the input simply ends.
        if in_pos + 2 > input.len() {
            break;
        }

        let offset = input[in_pos] as usize | (input[in_pos + 1] as usize) << 8;
        in_pos += 2;
        if offset == 0 || offset > out_pos {
            return Err(Error::InternalDecompression);
        }

        let mut match_len = (token & 0x0f) + MIN_MATCH;
        if match_len == MATCH_RUN_LEN + MIN_MATCH {
            match_len = read_varlen(input, &mut in_pos, match_len)?;
        }
        if out_pos + match_len > out_end {
            return Err(Error::InternalDecompression);
        }

        // Byte-wise copy: overlapping forward copies replicate short
        // patterns exactly as the format requires.
        let mut src = out_pos - offset;
        for _ in 0..match_len {
            out[out_pos] = out[src];
            out_pos += 1;
            src += 1;
        }
    }

    Ok(out_pos - out_start)
}
