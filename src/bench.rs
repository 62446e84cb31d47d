//! Throughput benchmarks for the `-cbench` and `-dbench` commands.
//!
//! Each benchmark loads the input file once, then runs several timed
//! in-memory passes and reports the best one (the least-disturbed pass is
//! the closest to the real cost of the code under test).

use std::io::Cursor;
use std::path::Path;

use crate::config::BENCH_PASSES;
use crate::error::Error;
use crate::io::{compress_stream, decompress_stream, StreamOptions};
use crate::timefn;

fn load_input(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(Error::SourceRead)
}

/// Benchmark compression of `path` under `opts`.
pub fn bench_compression(path: &Path, opts: &StreamOptions) -> Result<(), Error> {
    let data = load_input(path)?;
    let mut compressed = Vec::with_capacity(data.len() / 2 + 64);

    let mut best_ns = u64::MAX;
    let mut stats = None;
    for _ in 0..BENCH_PASSES {
        compressed.clear();
        let start = timefn::get_time();
        let s = compress_stream(&mut Cursor::new(&data), &mut compressed, &[], opts)?;
        best_ns = best_ns.min(timefn::clock_span_ns(start));
        stats = Some(s);
    }
    let stats = stats.expect("at least one pass");

    crate::displaylevel!(
        2,
        "{}: {} -> {} bytes ({:.2} %), {:.1} MiB/s, {} commands\n",
        path.display(),
        stats.original_size,
        stats.compressed_size,
        stats.compressed_size as f64 * 100.0 / (stats.original_size.max(1)) as f64,
        timefn::mib_per_sec(stats.original_size, best_ns),
        stats.command_count,
    );
    Ok(())
}

/// Benchmark decompression of `path` (compressed once in memory first).
pub fn bench_decompression(path: &Path, opts: &StreamOptions) -> Result<(), Error> {
    let data = load_input(path)?;
    let mut compressed = Vec::new();
    compress_stream(&mut Cursor::new(&data), &mut compressed, &[], opts)?;

    let mut best_ns = u64::MAX;
    let mut decoded = 0u64;
    for _ in 0..BENCH_PASSES {
        let start = timefn::get_time();
        let stats = decompress_stream(
            &mut Cursor::new(&compressed),
            &mut std::io::sink(),
            &[],
            opts.raw_block,
        )?;
        best_ns = best_ns.min(timefn::clock_span_ns(start));
        decoded = stats.original_size;
    }

    crate::displaylevel!(
        2,
        "{}: {} bytes decompressed, {:.1} MiB/s\n",
        path.display(),
        decoded,
        timefn::mib_per_sec(decoded, best_ns),
    );
    Ok(())
}
