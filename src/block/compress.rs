//! The block compression context and pipeline.
//!
//! A [`Compressor`] owns the index and parse buffers sized for the maximum
//! window it will see and reuses them for every block of a session.  One
//! block flows through five stages:
//!
//! ```text
//! window ── index ── find matches ── optimal parse ── reduce ── emit
//! ```
//!
//! The parser's cost and score arrays borrow the two index buffers, which
//! hold nothing live between match finding and the next block's index build,
//! keeping the context at three window-sized allocations.

use super::emit::{self, BlockOutcome};
use super::finder;
use super::parse;
use super::reduce;
use super::suffix::{self, OPEN_INTERVAL_SLOTS};
use super::types::{Match, Settings};
use crate::error::Error;

/// Single-threaded block compression context.
///
/// Construction allocates every buffer the pipeline needs; compressing a
/// block allocates nothing.
pub struct Compressor {
    intervals: Vec<u64>,
    pos_data: Vec<u64>,
    open_intervals: Vec<u64>,
    matches: Vec<Match>,
    settings: Settings,
    num_commands: usize,
}

fn alloc_words(len: usize) -> Result<Vec<u64>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    v.resize(len, 0);
    Ok(v)
}

impl Compressor {
    /// Create a context able to compress windows of up to `max_window_size`
    /// bytes (history plus block).
    pub fn new(max_window_size: usize, settings: Settings) -> Result<Self, Error> {
        let intervals = alloc_words(max_window_size)?;
        let pos_data = alloc_words(max_window_size)?;
        let open_intervals = alloc_words(OPEN_INTERVAL_SLOTS)?;

        let mut matches = Vec::new();
        matches
            .try_reserve_exact(max_window_size)
            .map_err(|_| Error::OutOfMemory)?;
        matches.resize(max_window_size, Match::default());

        Ok(Compressor {
            intervals,
            pos_data,
            open_intervals,
            matches,
            settings,
            num_commands: 0,
        })
    }

    /// Compress one block.
    ///
    /// `window` holds `prev_size` bytes of history followed by `data_size`
    /// bytes to compress; matches may reference the history but commands are
    /// only produced for the new bytes.  Returns the compressed size, or the
    /// incompressibility signal when the command stream would not fit `out`.
    pub fn shrink_block(
        &mut self,
        window: &[u8],
        prev_size: usize,
        data_size: usize,
        out: &mut [u8],
    ) -> Result<BlockOutcome, Error> {
        let end = prev_size + data_size;
        debug_assert!(window.len() >= end && end <= self.matches.len());

        suffix::build_index(
            &window[..end],
            &mut self.intervals[..end],
            &mut self.pos_data[..end],
            &mut self.open_intervals,
        );
        if prev_size > 0 {
            finder::skip_matches(&mut self.intervals, &mut self.pos_data, 0, prev_size);
        }
        finder::find_all_matches(
            &mut self.intervals,
            &mut self.pos_data,
            &mut self.matches,
            prev_size,
            end,
        );
        parse::optimize_matches(
            &mut self.matches,
            &mut self.pos_data,
            &mut self.intervals,
            prev_size,
            end,
            self.settings.favor_ratio,
        );
        reduce::optimize_command_count(&mut self.matches, window, prev_size, end);
        emit::write_block(
            &self.matches,
            window,
            prev_size,
            end,
            out,
            self.settings.raw_mode,
            &mut self.num_commands,
        )
    }

    /// Total number of commands emitted across all blocks so far.
    pub fn command_count(&self) -> usize {
        self.num_commands
    }
}
