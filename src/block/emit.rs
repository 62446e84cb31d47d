//! Block serialisation.
//!
//! Walks the final parse and emits LZ4 commands: token byte, literal-run
//! varlen and bytes, little-endian 16-bit offset, match-length varlen.  The
//! block always ends with a literals-only command; raw blocks additionally
//! carry a two-byte zero offset as an end-of-data marker.
//!
//! Running out of output room is a *signal*, not an error — the frame layer
//! stores the block uncompressed instead.  An illegal offset reaching this
//! point is a bug upstream and is reported as a hard error.

use super::types::{
    literals_varlen_size, match_varlen_size, Match, LITERALS_RUN_LEN, MATCH_RUN_LEN, MAX_OFFSET,
    MIN_MATCH, MIN_OFFSET,
};
use crate::error::Error;

/// Result of serialising one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Block fits; compressed byte count.
    Compressed(usize),
    /// The command stream would exceed the output limit.
    Incompressible,
}

#[inline]
fn write_varlen(out: &mut [u8], mut pos: usize, mut len: usize, run_len: usize) -> usize {
    if len >= run_len {
        len -= run_len;
        while len >= 255 {
            out[pos] = 255;
            pos += 1;
            len -= 255;
        }
        out[pos] = len as u8;
        pos += 1;
    }
    pos
}

/// Serialise `matches[start..end)` over `window` into `out[..max_out]`.
///
/// `num_commands` is incremented once per emitted command.
pub fn write_block(
    matches: &[Match],
    window: &[u8],
    start: usize,
    end: usize,
    out: &mut [u8],
    raw_mode: bool,
    num_commands: &mut usize,
) -> Result<BlockOutcome, Error> {
    let max_out = out.len();
    let mut out_pos = 0usize;
    let mut literals_run = 0usize;
    let mut first_literal = 0usize;

    let mut i = start;
    while i < end {
        let m = matches[i];
        if m.is_match() {
            let match_offset = m.offset as usize;
            let match_len = m.length as usize;
            let enc_len = match_len - MIN_MATCH;
            let token_literals = literals_run.min(LITERALS_RUN_LEN);
            let token_match = enc_len.min(MATCH_RUN_LEN);
            let command_size = 1
                + literals_varlen_size(literals_run)
                + literals_run
                + 2
                + match_varlen_size(enc_len);

            if out_pos + command_size > max_out {
                return Ok(BlockOutcome::Incompressible);
            }
            if !(MIN_OFFSET..=MAX_OFFSET).contains(&match_offset) {
                return Err(Error::InternalCompression);
            }

            out[out_pos] = ((token_literals << 4) | token_match) as u8;
            out_pos += 1;
            out_pos = write_varlen(out, out_pos, literals_run, LITERALS_RUN_LEN);

            if literals_run != 0 {
                out[out_pos..out_pos + literals_run]
                    .copy_from_slice(&window[first_literal..first_literal + literals_run]);
                out_pos += literals_run;
                literals_run = 0;
            }

            out[out_pos] = (match_offset & 0xff) as u8;
            out[out_pos + 1] = (match_offset >> 8) as u8;
            out_pos += 2;
            out_pos = write_varlen(out, out_pos, enc_len, MATCH_RUN_LEN);

            i += match_len;
            *num_commands += 1;
        } else {
            if literals_run == 0 {
                first_literal = i;
            }
            literals_run += 1;
            i += 1;
        }
    }

    // Final command: literals only.
    {
        let token_literals = literals_run.min(LITERALS_RUN_LEN);
        let command_size = 1 + literals_varlen_size(literals_run) + literals_run;

        if out_pos + command_size > max_out {
            return Ok(BlockOutcome::Incompressible);
        }

        out[out_pos] = (token_literals << 4) as u8;
        out_pos += 1;
        out_pos = write_varlen(out, out_pos, literals_run, LITERALS_RUN_LEN);

        if literals_run != 0 {
            out[out_pos..out_pos + literals_run]
                .copy_from_slice(&window[first_literal..first_literal + literals_run]);
            out_pos += literals_run;
        }

        if raw_mode {
            // Zero match offset marks end-of-data in an unframed block.
            if out_pos + 2 > max_out {
                return Ok(BlockOutcome::Incompressible);
            }
            out[out_pos] = 0;
            out[out_pos + 1] = 0;
            out_pos += 2;
        }

        *num_commands += 1;
    }

    Ok(BlockOutcome::Compressed(out_pos))
}
