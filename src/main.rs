//! Binary entry point for the `lz4opt` command-line tool.
//!
//! Exit codes: `0` on success, `100` on any error — one error channel, with
//! diagnostics on stderr.

use lz4opt::cli::constants::set_display_level;
use lz4opt::cli::help::print_usage;
use lz4opt::cli::{parse_args, OpMode, ParsedArgs};
use lz4opt::{bench, displaylevel, selftest, timefn, Error};

const EXIT_ERROR: i32 = 100;

fn compress(args: &ParsedArgs) -> Result<(), Error> {
    let input = args.input.as_deref().expect("validated by the parser");
    let output = args.output.as_deref().expect("validated by the parser");

    let start = timefn::get_time();
    let stats = lz4opt::compress_file(input, output, args.dictionary.as_deref(), &args.options)?;
    let elapsed_ns = timefn::clock_span_ns(start);
    displaylevel!(
        3,
        "\rCompressed '{}' in {:.2}s ({:.1} MiB/s), {} commands, {} into {} bytes ({:.2} %), {} KiB blocks\n",
        input.display(),
        elapsed_ns as f64 / 1e9,
        timefn::mib_per_sec(stats.original_size, elapsed_ns),
        stats.command_count,
        stats.original_size,
        stats.compressed_size,
        stats.compressed_size as f64 * 100.0 / (stats.original_size.max(1)) as f64,
        lz4opt::frame::block_max_size(stats.block_max_code) >> 10,
    );

    if args.verify {
        let verified = lz4opt::verify_file(
            output,
            input,
            args.dictionary.as_deref(),
            args.options.raw_block,
        )?;
        displaylevel!(3, "Verified {} bytes\n", verified);
    }
    Ok(())
}

fn decompress(args: &ParsedArgs) -> Result<(), Error> {
    let input = args.input.as_deref().expect("validated by the parser");
    let output = args.output.as_deref().expect("validated by the parser");

    let start = timefn::get_time();
    let stats = lz4opt::decompress_file(
        input,
        output,
        args.dictionary.as_deref(),
        args.options.raw_block,
    )?;
    let elapsed_ns = timefn::clock_span_ns(start);
    displaylevel!(
        3,
        "Decompressed '{}' in {:.2}s ({:.1} MiB/s), {} bytes\n",
        input.display(),
        elapsed_ns as f64 / 1e9,
        timefn::mib_per_sec(stats.original_size, elapsed_ns),
        stats.original_size,
    );
    Ok(())
}

/// Dispatch the parsed command; returns the process exit code.
fn run(args: ParsedArgs) -> i32 {
    let result = match args.op_mode {
        OpMode::Compress => compress(&args),
        OpMode::Decompress => decompress(&args),
        OpMode::CompressBench => bench::bench_compression(
            args.input.as_deref().expect("validated by the parser"),
            &args.options,
        ),
        OpMode::DecompressBench => bench::bench_decompression(
            args.input.as_deref().expect("validated by the parser"),
            &args.options,
        ),
        OpMode::SelfTest => {
            // The battery prints its own per-check diagnostics.
            return if selftest::run_self_test() { 0 } else { EXIT_ERROR };
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("lz4opt: {}", e);
            EXIT_ERROR
        }
    }
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("lz4opt: {}", e);
            print_usage();
            std::process::exit(EXIT_ERROR);
        }
    };

    if args.verbose {
        set_display_level(3);
    }

    std::process::exit(run(args));
}
