//! Command-count reduction.
//!
//! A single forward pass over the parse that rewrites commands without ever
//! growing the encoded output:
//!
//! - **Demotion**: a short match (≤ 19 bytes) whose command costs at least
//!   as much as spelling its bytes out as literals is converted to literals,
//!   folding into the neighbouring runs.
//! - **Fusion**: two adjacent matches whose concatenation still decodes
//!   identically through the first offset are joined into one command.  This
//!   is also what reassembles repeats longer than the index's LCP cap into a
//!   single match (up to the 65535 length the DP never sees).
//!
//! Fused-away positions carry the [`Match::FUSED`] sentinel so the emitter
//! walk skips them naturally.

use super::types::{
    literals_varlen_size, match_varlen_size, Match, LEAVE_ALONE_MATCH_SIZE, MIN_MATCH,
};

#[inline]
fn literals_varlen_bits(len: usize) -> usize {
    literals_varlen_size(len) << 3
}

#[inline]
fn match_varlen_bits(enc_len: usize) -> usize {
    match_varlen_size(enc_len) << 3
}

/// Demotion is only ever profitable for matches short enough that their
/// command overhead rivals the literal bytes themselves.
const DEMOTE_MAX_LEN: usize = 19;

/// Rewrite `matches[start..end)` in place, reducing the command count.
pub fn optimize_command_count(
    matches: &mut [Match],
    window: &[u8],
    start: usize,
    end: usize,
) {
    let mut literals_run = 0usize;

    let mut i = start;
    while i < end {
        let m = matches[i];
        if m.is_match() {
            let match_len = m.length as usize;
            let mut demote = false;

            if match_len <= DEMOTE_MAX_LEN && i + match_len < end {
                let enc_len = match_len - MIN_MATCH;
                let cmd_bits =
                    8 + literals_varlen_bits(literals_run) + 16 + match_varlen_bits(enc_len);

                if matches[i + match_len].is_match() {
                    // Next command is a match with no literals of its own:
                    // turning this match into literals only charges the next
                    // command the cost of carrying them.
                    if cmd_bits
                        >= (match_len << 3) + literals_varlen_bits(literals_run + match_len)
                    {
                        demote = true;
                    }
                } else {
                    // Next command starts with literals; demoting must not
                    // grow their varlen encoding either.
                    let mut cur = i + match_len;
                    let mut next_literals = 0usize;
                    loop {
                        cur += 1;
                        next_literals += 1;
                        if cur >= end || matches[cur].is_match() {
                            break;
                        }
                    }
                    if cmd_bits
                        >= (match_len << 3)
                            + literals_varlen_bits(literals_run + next_literals + match_len)
                            - literals_varlen_bits(next_literals)
                    {
                        demote = true;
                    }
                }
            }

            if demote {
                for slot in &mut matches[i..i + match_len] {
                    slot.length = 0;
                }
                literals_run += match_len;
                i += match_len;
                continue;
            }

            // Fusion: extend this match over the next one when the bytes
            // after it still agree through our own offset.
            if i + match_len < end && m.offset > 0 && match_len >= 2 {
                let next = matches[i + match_len];
                let next_len = next.length.max(0) as usize;
                let combined = match_len + next_len;
                if next.offset > 0
                    && next.length >= 2
                    && combined >= LEAVE_ALONE_MATCH_SIZE
                    && combined <= 65_535
                    && i + match_len >= m.offset as usize
                    && i + match_len >= next.offset as usize
                    && i + match_len + next_len <= end
                    && window[i + match_len - m.offset as usize..][..next_len]
                        == window[i + match_len - next.offset as usize..][..next_len]
                {
                    matches[i].length += next.length;
                    matches[i + match_len] = Match {
                        length: Match::FUSED,
                        offset: 0,
                    };
                    // Re-examine the extended match; it may fuse again.
                    continue;
                }
            }

            literals_run = 0;
            i += match_len;
        } else {
            literals_run += 1;
            i += 1;
        }
    }
}
