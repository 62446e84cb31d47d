//! Block-format constants, the packed LCP-word layout, and the match record.
//!
//! Everything the core stages share lives here: the LZ4 command-encoding
//! limits, the parsing restrictions near the end of a block, and the bit
//! layout of the interval words the index builder and match finder exchange.

// ─────────────────────────────────────────────────────────────────────────────
// LZ4 command encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length representable by the LZ4 block format.
pub const MIN_MATCH: usize = 4;

/// Literal-run length at which the token nibble saturates and extra
/// length bytes begin.
pub const LITERALS_RUN_LEN: usize = 15;

/// Encoded match length (`actual − 4`) at which the token nibble saturates.
pub const MATCH_RUN_LEN: usize = 15;

/// Smallest legal match offset.
pub const MIN_OFFSET: usize = 1;

/// Largest legal match offset.
pub const MAX_OFFSET: usize = 65_535;

// ─────────────────────────────────────────────────────────────────────────────
// Parsing restrictions
// ─────────────────────────────────────────────────────────────────────────────

/// The final bytes of a block are always emitted as literals.
pub const LAST_LITERALS: usize = 5;

/// No match may start closer than this to the end of the block.
pub const LAST_MATCH_OFFSET: usize = 12;

// ─────────────────────────────────────────────────────────────────────────────
// Window sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Number of previously-seen bytes kept as match history ahead of the bytes
/// being compressed (also the dictionary size cap).
pub const HISTORY_SIZE: usize = 65_536;

// ─────────────────────────────────────────────────────────────────────────────
// Packed LCP words
//
// `intervals[]` and `pos_data[]` entries pack an LCP length and a position or
// interval id into one 64-bit word: the low LCP_SHIFT bits hold the
// position/id, the next LCP_BITS bits hold the LCP length.  Positions stay
// below 2^23 (4 MiB block + 64 KiB history), so 24 bits suffice.
// ─────────────────────────────────────────────────────────────────────────────

/// Bits reserved for the LCP length field.
pub const LCP_BITS: u32 = 15;

/// Bit position of the LCP length field.
pub const LCP_SHIFT: u32 = 24;

/// LCP lengths are capped here; longer repeats are recovered by command
/// fusion in the reducer.
pub const LCP_MAX: u64 = 1 << (LCP_BITS - 1);

/// Mask selecting the LCP length field.
pub const LCP_MASK: u64 = ((1u64 << LCP_BITS) - 1) << LCP_SHIFT;

/// Mask selecting the position / interval-id field.
pub const POS_MASK: u64 = (1u64 << LCP_SHIFT) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Parser tunables
// ─────────────────────────────────────────────────────────────────────────────

/// Matches at least this long are never worth shortening; the parser
/// considers only their full length.
pub const LEAVE_ALONE_MATCH_SIZE: usize = 1000;

/// Extra bit of cost charged when a command is immediately followed by
/// another match, biasing ties toward longer literal runs.
pub const MODESWITCH_PENALTY: u64 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Match record
// ─────────────────────────────────────────────────────────────────────────────

/// One match candidate / parse decision for a window position.
///
/// `length >= MIN_MATCH` marks a match start; `length == 0` a literal;
/// `length == FUSED` a byte consumed by a preceding fused match.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Match {
    pub length: i32,
    pub offset: u32,
}

impl Match {
    /// Sentinel for positions swallowed by command fusion.
    pub const FUSED: i32 = -1;

    /// True when this record is a usable match start.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.length >= MIN_MATCH as i32
    }
}

/// Per-context compression settings that affect the block pipeline itself.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// `true`: minimise output size; `false`: trade a little ratio for
    /// faster decompression (fewer commands, fast-path match lengths).
    pub favor_ratio: bool,
    /// Emit the raw-block end-of-data trailer instead of relying on framing.
    pub raw_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            favor_ratio: true,
            raw_mode: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Varlen sizing and the output bound
// ─────────────────────────────────────────────────────────────────────────────

/// Extra bytes needed to encode a literal-run length.
#[inline]
pub fn literals_varlen_size(len: usize) -> usize {
    if len < LITERALS_RUN_LEN {
        0
    } else {
        (len - LITERALS_RUN_LEN) / 255 + 1
    }
}

/// Extra bytes needed to encode a match length (`enc_len = actual − 4`).
#[inline]
pub fn match_varlen_size(enc_len: usize) -> usize {
    if enc_len < MATCH_RUN_LEN {
        0
    } else {
        (enc_len - MATCH_RUN_LEN) / 255 + 1
    }
}

/// Worst-case compressed size for `n` input bytes (all-literal block plus
/// varlen and trailer headroom).
pub fn compress_bound(n: usize) -> usize {
    n + n / 255 + 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_varlen_boundaries() {
        assert_eq!(literals_varlen_size(0), 0);
        assert_eq!(literals_varlen_size(14), 0);
        assert_eq!(literals_varlen_size(15), 1);
        assert_eq!(literals_varlen_size(269), 1); // 15 + 254
        assert_eq!(literals_varlen_size(270), 2); // 15 + 255
        assert_eq!(literals_varlen_size(524), 2);
        assert_eq!(literals_varlen_size(525), 3);
    }

    #[test]
    fn match_varlen_boundaries() {
        assert_eq!(match_varlen_size(0), 0);
        assert_eq!(match_varlen_size(14), 0);
        assert_eq!(match_varlen_size(15), 1);
        assert_eq!(match_varlen_size(269), 1);
        assert_eq!(match_varlen_size(270), 2);
    }

    #[test]
    fn packed_word_fields_do_not_overlap() {
        assert_eq!(LCP_MASK & POS_MASK, 0);
        assert!(LCP_MAX <= (LCP_MASK >> LCP_SHIFT));
        // The largest window position must fit the position field.
        assert!(((4 << 20) + HISTORY_SIZE as u64) < (1 << LCP_SHIFT));
    }

    #[test]
    fn bound_covers_all_literal_output() {
        for n in [0usize, 1, 14, 15, 65536] {
            // token + varlen + literals + raw trailer
            assert!(compress_bound(n) >= 1 + literals_varlen_size(n) + n + 2);
        }
    }
}
