//! Optimal command selection.
//!
//! A reverse dynamic program over the match array: `cost[p]` is the minimum
//! number of encoded bits for `W[p..end)`, `score[p]` a command-count
//! accumulator used to break cost ties.  Sweeping backwards means every
//! `cost[p + k]` a trial needs is already final, which keeps the tie-break
//! deterministic.
//!
//! The cost model is the LZ4 command encoding: an 8-bit token, a 16-bit
//! offset, one extra byte per 255 units of literal-run or match length past
//! the token nibbles.  A one-bit penalty on literal→match boundaries nudges
//! ties toward fewer mode switches.
//!
//! Both working arrays borrow the index buffers, which are dead between
//! match finding and the next block's index build.

use super::types::{
    match_varlen_size, Match, LAST_LITERALS, LEAVE_ALONE_MATCH_SIZE, MATCH_RUN_LEN, MIN_MATCH,
    MODESWITCH_PENALTY,
};

/// Speed-favoring parses truncate chosen match lengths in
/// `(FAST_PATH_LEN, FAST_PATH_LEN * 2]` down to `FAST_PATH_LEN`, keeping the
/// decoder's short-match fast path applicable at a small ratio cost.
const FAST_PATH_LEN: usize = 14;

#[inline]
fn match_varlen_bits(enc_len: usize) -> u64 {
    (match_varlen_size(enc_len) as u64) << 3
}

/// Rewrite `matches[start..end)` into the cost-minimal command assignment.
///
/// On return, positions with `length >= MIN_MATCH` are the chosen match
/// starts; everything else is a literal.
pub fn optimize_matches(
    matches: &mut [Match],
    cost: &mut [u64],
    score: &mut [u64],
    start: usize,
    end: usize,
    favor_ratio: bool,
) {
    if end - start < 2 {
        return;
    }

    let extra_match_score: u64 = if favor_ratio { 1 } else { 5 };

    cost[end - 1] = 8;
    score[end - 1] = 0;
    let mut last_literals_offset = end;

    for i in (start..end - 1).rev() {
        let literals_len = last_literals_offset - i;

        // Take a literal at `i`.
        let mut best_cost = 8 + cost[i + 1];
        let mut best_score = 1 + score[i + 1];
        if literals_len >= 15 && (literals_len - 15) % 255 == 0 {
            // The literal run crosses a varlen boundary here; the extra
            // byte's cost accumulates down the chain.
            best_cost += 8;
        }
        if matches[i + 1].is_match() {
            best_cost += MODESWITCH_PENALTY;
        }
        let mut best_len = 0i32;
        let mut best_offset = 0u32;

        let m = matches[i];
        if m.is_match() {
            let offset = m.offset;
            let limit = end - LAST_LITERALS - i;
            let mut match_len = (m.length as usize).min(limit);

            if m.length as usize >= LEAVE_ALONE_MATCH_SIZE {
                // Long matches are never worth shortening.
                let cur_cost = {
                    let mut c =
                        8 + 16 + match_varlen_bits(match_len - MIN_MATCH) + cost[i + match_len];
                    if matches[i + match_len].is_match() {
                        c += MODESWITCH_PENALTY;
                    }
                    c
                };
                let cur_score = extra_match_score + score[i + match_len];
                if best_cost > cur_cost || (best_cost == cur_cost && best_score > cur_score) {
                    best_cost = cur_cost;
                    best_score = cur_score;
                    best_len = match_len as i32;
                    best_offset = offset;
                }
            } else {
                if !favor_ratio && match_len > FAST_PATH_LEN && match_len <= 2 * FAST_PATH_LEN {
                    match_len = FAST_PATH_LEN;
                }

                // Trims that still need extra match-length bytes.
                let mut k = match_len;
                while k >= MATCH_RUN_LEN + MIN_MATCH {
                    let mut cur_cost =
                        8 + 16 + match_varlen_bits(k - MIN_MATCH) + cost[i + k];
                    if matches[i + k].is_match() {
                        cur_cost += MODESWITCH_PENALTY;
                    }
                    let cur_score = extra_match_score + score[i + k];
                    if best_cost > cur_cost || (best_cost == cur_cost && best_score > cur_score)
                    {
                        best_cost = cur_cost;
                        best_score = cur_score;
                        best_len = k as i32;
                        best_offset = offset;
                    }
                    k -= 1;
                }

                // Trims encoded entirely in the token nibble.
                while k >= MIN_MATCH && k <= match_len {
                    let mut cur_cost = 8 + 16 + cost[i + k];
                    if matches[i + k].is_match() {
                        cur_cost += MODESWITCH_PENALTY;
                    }
                    let cur_score = extra_match_score + score[i + k];
                    if best_cost > cur_cost || (best_cost == cur_cost && best_score > cur_score)
                    {
                        best_cost = cur_cost;
                        best_score = cur_score;
                        best_len = k as i32;
                        best_offset = offset;
                    }
                    k -= 1;
                }
            }
        }

        if best_len >= MIN_MATCH as i32 {
            last_literals_offset = i;
        }
        cost[i] = best_cost;
        score[i] = best_score;
        matches[i] = Match {
            length: best_len,
            offset: best_offset,
        };
    }
}
