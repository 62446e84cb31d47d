//! Compile-time configuration constants for the programs layer.
//!
//! Runtime behaviour (block-size code, block dependence, ratio vs. speed) is
//! selected through CLI flags; these are only the defaults and tool-wide
//! tunables.

/// Default block-size code applied when no `-B#` flag is given (`7` = 4 MiB).
pub const BLOCK_MAX_CODE_DEFAULT: u32 = 7;

/// Smallest selectable block-size code (`4` = 64 KiB).
pub const BLOCK_MAX_CODE_MIN: u32 = 4;

/// Largest selectable block-size code (`7` = 4 MiB).
pub const BLOCK_MAX_CODE_MAX: u32 = 7;

/// Raw-block mode holds a single block; inputs above this size are rejected.
pub const RAW_BLOCK_MAX_INPUT: usize = 4 * 1024 * 1024;

/// Number of timed passes per benchmark measurement (`-cbench` / `-dbench`).
pub const BENCH_PASSES: u32 = 6;
