//! The block compression core.
//!
//! `suffix` builds the match index, `finder` queries it, `parse` chooses an
//! optimal command sequence, `reduce` trims the command count, and `emit`
//! serialises the result.  `compress` ties the pipeline together behind the
//! [`Compressor`] context; `decompress` is the bounds-checked verification
//! decoder.

pub mod compress;
pub mod decompress;
pub mod emit;
pub mod finder;
pub mod parse;
pub mod reduce;
pub mod suffix;
pub mod types;

pub use compress::Compressor;
pub use decompress::expand_block;
pub use emit::BlockOutcome;
pub use types::{compress_bound, Match, Settings, HISTORY_SIZE};
