//! Stream and file drivers around the block core.
//!
//! [`compress_stream`] / [`decompress_stream`] operate on any sequential
//! reader and writer; the `*_file` wrappers add buffered file I/O and
//! dictionary loading, and [`verify_file`] re-decodes a compressed file
//! against its source through a comparison sink.

pub mod compress;
pub mod decompress;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::config::BLOCK_MAX_CODE_DEFAULT;
use crate::dictionary;
use crate::error::Error;
use crate::stream::CompareSink;

pub use compress::compress_stream;
pub use decompress::decompress_stream;

/// Container and parser selections for one operation.
#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    /// Block-size code `4..=7` (64 KiB .. 4 MiB); ignored by legacy frames.
    pub block_max_code: u32,
    /// Self-contained blocks (no inter-block back references).
    pub independent_blocks: bool,
    /// Legacy container: old magic, 8 MiB blocks, no terminator.
    pub legacy_frames: bool,
    /// Single unframed block with a two-byte end marker.
    pub raw_block: bool,
    /// Parser bias: `true` = best ratio, `false` = favour decode speed.
    pub favor_ratio: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions {
            block_max_code: BLOCK_MAX_CODE_DEFAULT,
            independent_blocks: false,
            legacy_frames: false,
            raw_block: false,
            favor_ratio: true,
        }
    }
}

/// Sizes and counters reported after compression.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompressStats {
    pub original_size: u64,
    pub compressed_size: u64,
    pub command_count: usize,
    /// The block-size code actually written to the header (short inputs
    /// downgrade the requested code).
    pub block_max_code: u32,
}

/// Sizes reported after decompression.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecompressStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

fn load_dictionary(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    match path {
        Some(p) => dictionary::load(p),
        None => Ok(Vec::new()),
    }
}

/// Compress `input_path` into `output_path`.
pub fn compress_file(
    input_path: &Path,
    output_path: &Path,
    dictionary_path: Option<&Path>,
    opts: &StreamOptions,
) -> Result<CompressStats, Error> {
    let dict = load_dictionary(dictionary_path)?;
    let mut input = BufReader::new(File::open(input_path).map_err(Error::SourceRead)?);
    let mut output = BufWriter::new(File::create(output_path).map_err(Error::SinkWrite)?);
    compress_stream(&mut input, &mut output, &dict, opts)
}

/// Decompress `input_path` into `output_path`.
pub fn decompress_file(
    input_path: &Path,
    output_path: &Path,
    dictionary_path: Option<&Path>,
    raw_block: bool,
) -> Result<DecompressStats, Error> {
    let dict = load_dictionary(dictionary_path)?;
    let mut input = BufReader::new(File::open(input_path).map_err(Error::SourceRead)?);
    let mut output = BufWriter::new(File::create(output_path).map_err(Error::SinkWrite)?);
    decompress_stream(&mut input, &mut output, &dict, raw_block)
}

/// Decompress `compressed_path` and compare the result against
/// `original_path` byte for byte.  Returns the number of verified bytes.
pub fn verify_file(
    compressed_path: &Path,
    original_path: &Path,
    dictionary_path: Option<&Path>,
    raw_block: bool,
) -> Result<u64, Error> {
    let dict = load_dictionary(dictionary_path)?;
    let mut input = BufReader::new(File::open(compressed_path).map_err(Error::SourceRead)?);
    let original = BufReader::new(File::open(original_path).map_err(Error::SourceRead)?);

    let mut sink = CompareSink::new(original);
    decompress_stream(&mut input, &mut sink, &dict, raw_block)?;
    sink.finish().map_err(Error::SinkWrite)
}
