//! Self-test battery for the `-test` command.
//!
//! Exercises the full pipeline in memory across block-size codes, block
//! dependence, both parser biases, both containers, raw blocks, and
//! dictionaries, verifying byte-exact round-trips and the format-level
//! guarantees (header checksum, raw end marker, downgraded block codes).

use std::io::Cursor;

use crate::config::{BLOCK_MAX_CODE_MAX, BLOCK_MAX_CODE_MIN};
use crate::error::Error;
use crate::io::{compress_stream, decompress_stream, CompressStats, StreamOptions};
use crate::lorem;

fn roundtrip(
    data: &[u8],
    opts: &StreamOptions,
    dict: &[u8],
) -> Result<(CompressStats, Vec<u8>), String> {
    let mut compressed = Vec::new();
    let stats = compress_stream(&mut Cursor::new(data), &mut compressed, dict, opts)
        .map_err(|e| format!("compress: {}", e))?;

    let mut decoded = Vec::new();
    decompress_stream(
        &mut Cursor::new(&compressed),
        &mut decoded,
        dict,
        opts.raw_block,
    )
    .map_err(|e| format!("decompress: {}", e))?;

    if decoded != data {
        return Err(format!(
            "round-trip mismatch: {} in, {} out",
            data.len(),
            decoded.len()
        ));
    }
    Ok((stats, compressed))
}

fn opts(code: u32, independent: bool, favor_ratio: bool) -> StreamOptions {
    StreamOptions {
        block_max_code: code,
        independent_blocks: independent,
        favor_ratio,
        ..StreamOptions::default()
    }
}

fn scenario_inputs() -> Vec<(&'static str, Vec<u8>)> {
    let mut alternating = vec![0u8; 1 << 20];
    for (i, b) in alternating.iter_mut().enumerate() {
        *b = if i % 2 == 0 { 0xAA } else { 0x55 };
    }
    vec![
        ("empty", Vec::new()),
        ("one byte", b"a".to_vec()),
        ("short repeat", b"abcabcabcabc".to_vec()),
        ("64 KiB zeros", vec![0u8; 65536]),
        ("1 MiB alternating", alternating),
        ("100 kB text", lorem::gen_buffer(100_000, 0xC0FFEE)),
    ]
}

fn check_scenarios(failures: &mut usize) {
    for (name, data) in scenario_inputs() {
        for code in BLOCK_MAX_CODE_MIN..=BLOCK_MAX_CODE_MAX {
            let label = format!("{} (code {})", name, code);
            match roundtrip(&data, &opts(code, false, true), &[]) {
                Ok((stats, _)) => {
                    let mut problems = Vec::new();
                    if name == "64 KiB zeros" && stats.command_count != 2 {
                        problems.push(format!("{} commands, expected 2", stats.command_count));
                    }
                    if name == "1 MiB alternating"
                        && stats.compressed_size >= stats.original_size / 10
                    {
                        problems.push(format!("only reached {} bytes", stats.compressed_size));
                    }
                    if name == "100 kB text" && stats.compressed_size >= stats.original_size {
                        problems.push("did not shrink text".to_owned());
                    }
                    if problems.is_empty() {
                        crate::displaylevel!(2, "ok   {}\n", label);
                    } else {
                        crate::displaylevel!(1, "FAIL {}: {}\n", label, problems.join("; "));
                        *failures += 1;
                    }
                }
                Err(e) => {
                    crate::displaylevel!(1, "FAIL {}: {}\n", label, e);
                    *failures += 1;
                }
            }
        }
    }
}

fn check_flag_matrix(failures: &mut usize) {
    let data = lorem::gen_buffer(200_000, 7);
    for code in BLOCK_MAX_CODE_MIN..=BLOCK_MAX_CODE_MAX {
        for independent in [false, true] {
            for favor_ratio in [true, false] {
                let label = format!(
                    "matrix code {} {} {}",
                    code,
                    if independent { "indep" } else { "dep" },
                    if favor_ratio { "ratio" } else { "speed" },
                );
                match roundtrip(&data, &opts(code, independent, favor_ratio), &[]) {
                    Ok(_) => crate::displaylevel!(2, "ok   {}\n", label),
                    Err(e) => {
                        crate::displaylevel!(1, "FAIL {}: {}\n", label, e);
                        *failures += 1;
                    }
                }
            }
        }
    }
}

fn check_speed_bias_reduces_commands(failures: &mut usize) {
    let data = lorem::gen_buffer(100_000, 0xBEEF);
    let ratio = roundtrip(&data, &opts(7, false, true), &[]);
    let speed = roundtrip(&data, &opts(7, false, false), &[]);
    match (ratio, speed) {
        (Ok((r, _)), Ok((s, _))) if s.command_count < r.command_count => {
            crate::displaylevel!(
                2,
                "ok   speed bias: {} < {} commands\n",
                s.command_count,
                r.command_count
            );
        }
        (Ok((r, _)), Ok((s, _))) => {
            crate::displaylevel!(
                1,
                "FAIL speed bias: {} commands vs {} with ratio bias\n",
                s.command_count,
                r.command_count
            );
            *failures += 1;
        }
        _ => {
            crate::displaylevel!(1, "FAIL speed bias: round-trip failed\n");
            *failures += 1;
        }
    }
}

fn check_header_checksum_rejected(failures: &mut usize) {
    let data = lorem::gen_buffer(10_000, 3);
    let mut compressed = Vec::new();
    if compress_stream(
        &mut Cursor::new(&data),
        &mut compressed,
        &[],
        &StreamOptions::default(),
    )
    .is_err()
    {
        crate::displaylevel!(1, "FAIL header checksum: compression failed\n");
        *failures += 1;
        return;
    }
    compressed[6] ^= 0x01;
    match decompress_stream(
        &mut Cursor::new(&compressed),
        &mut Vec::<u8>::new(),
        &[],
        false,
    ) {
        Err(Error::Checksum) => crate::displaylevel!(2, "ok   corrupt header rejected\n"),
        other => {
            crate::displaylevel!(1, "FAIL header checksum: {:?}\n", other.map(|_| ()));
            *failures += 1;
        }
    }
}

fn check_raw_block(failures: &mut usize) {
    let data = lorem::gen_buffer(30_000, 9);
    let raw_opts = StreamOptions {
        raw_block: true,
        ..StreamOptions::default()
    };
    match roundtrip(&data, &raw_opts, &[]) {
        Ok((_, compressed)) if compressed.ends_with(&[0, 0]) => {
            crate::displaylevel!(2, "ok   raw block with end marker\n");
        }
        Ok(_) => {
            crate::displaylevel!(1, "FAIL raw block: missing end marker\n");
            *failures += 1;
        }
        Err(e) => {
            crate::displaylevel!(1, "FAIL raw block: {}\n", e);
            *failures += 1;
        }
    }

    // More than one block's worth of input cannot go into a raw block.
    let big = lorem::gen_buffer(100_000, 10);
    let small_block_raw = StreamOptions {
        raw_block: true,
        block_max_code: 4,
        ..StreamOptions::default()
    };
    match compress_stream(
        &mut Cursor::new(&big),
        &mut Vec::<u8>::new(),
        &[],
        &small_block_raw,
    ) {
        Err(Error::RawTooLarge) => crate::displaylevel!(2, "ok   oversized raw input rejected\n"),
        other => {
            crate::displaylevel!(1, "FAIL raw size check: {:?}\n", other.map(|_| ()));
            *failures += 1;
        }
    }
}

fn check_legacy_frames(failures: &mut usize) {
    let data = lorem::gen_buffer(300_000, 11);
    let legacy_opts = StreamOptions {
        legacy_frames: true,
        ..StreamOptions::default()
    };
    match roundtrip(&data, &legacy_opts, &[]) {
        Ok((_, compressed)) if compressed.starts_with(&[0x02, 0x21, 0x4C, 0x18]) => {
            crate::displaylevel!(2, "ok   legacy frames\n");
        }
        Ok(_) => {
            crate::displaylevel!(1, "FAIL legacy frames: wrong magic\n");
            *failures += 1;
        }
        Err(e) => {
            crate::displaylevel!(1, "FAIL legacy frames: {}\n", e);
            *failures += 1;
        }
    }
}

fn check_dictionary(failures: &mut usize) {
    let dict = lorem::gen_buffer(50_000, 42);
    // Input heavily overlaps the dictionary, so seeding must shrink it.
    let data = dict[10_000..40_000].to_vec();

    let plain = roundtrip(&data, &StreamOptions::default(), &[]);
    let seeded = roundtrip(&data, &StreamOptions::default(), &dict);
    match (plain, seeded) {
        (Ok((p, _)), Ok((s, _))) if s.compressed_size < p.compressed_size => {
            crate::displaylevel!(
                2,
                "ok   dictionary: {} < {} bytes\n",
                s.compressed_size,
                p.compressed_size
            );
        }
        (Ok(_), Ok((s, _))) => {
            crate::displaylevel!(
                1,
                "FAIL dictionary did not help ({} bytes)\n",
                s.compressed_size
            );
            *failures += 1;
        }
        _ => {
            crate::displaylevel!(1, "FAIL dictionary round-trip\n");
            *failures += 1;
        }
    }
}

/// Run every check; returns `true` when all of them passed.
pub fn run_self_test() -> bool {
    let mut failures = 0usize;
    check_scenarios(&mut failures);
    check_flag_matrix(&mut failures);
    check_speed_bias_reduces_commands(&mut failures);
    check_header_checksum_rejected(&mut failures);
    check_raw_block(&mut failures);
    check_legacy_frames(&mut failures);
    check_dictionary(&mut failures);

    if failures == 0 {
        crate::displaylevel!(1, "self-test passed\n");
        true
    } else {
        crate::displaylevel!(1, "self-test: {} failure(s)\n", failures);
        false
    }
}
