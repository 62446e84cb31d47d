//! End-to-end stream tests: compress and decompress whole streams in memory
//! across the full option matrix, plus the format-level guarantees a stock
//! decoder relies on.

use std::io::Cursor;

use lz4opt::frame::{FRAME_MAGIC, HEADER_SIZE, LEGACY_FRAME_MAGIC};
use lz4opt::{compress_stream, decompress_stream, CompressStats, Error, StreamOptions};

fn roundtrip_with(data: &[u8], opts: &StreamOptions, dict: &[u8]) -> (CompressStats, Vec<u8>) {
    let mut compressed = Vec::new();
    let stats = compress_stream(&mut Cursor::new(data), &mut compressed, dict, opts)
        .expect("compression failed");

    let mut decoded = Vec::new();
    decompress_stream(
        &mut Cursor::new(&compressed),
        &mut decoded,
        dict,
        opts.raw_block,
    )
    .expect("decompression failed");
    assert_eq!(decoded, data, "round-trip mismatch");

    (stats, compressed)
}

fn opts(code: u32, independent: bool, favor_ratio: bool) -> StreamOptions {
    StreamOptions {
        block_max_code: code,
        independent_blocks: independent,
        favor_ratio,
        ..StreamOptions::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip matrix
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn roundtrip_matrix_over_all_flags() {
    // Multi-block with code 4 (several 64 KiB blocks), single-block above.
    let data = lz4opt::lorem::gen_buffer(200_000, 1);
    for code in 4..=7 {
        for independent in [false, true] {
            for favor_ratio in [true, false] {
                let (stats, _) = roundtrip_with(&data, &opts(code, independent, favor_ratio), &[]);
                assert!(stats.compressed_size < stats.original_size);
            }
        }
    }
}

#[test]
fn roundtrip_empty_input() {
    let (stats, compressed) = roundtrip_with(b"", &StreamOptions::default(), &[]);
    // Header and end marker only.
    assert_eq!(compressed.len(), HEADER_SIZE + 4);
    assert_eq!(stats.original_size, 0);
}

#[test]
fn roundtrip_single_byte() {
    let (stats, compressed) = roundtrip_with(b"a", &StreamOptions::default(), &[]);
    assert_eq!(stats.original_size, 1);
    // A one-byte block cannot beat its own size, so it is stored:
    // header + prefix + byte + end marker.
    assert_eq!(compressed.len(), HEADER_SIZE + 4 + 1 + 4);
}

#[test]
fn roundtrip_short_repeat() {
    for code in 4..=7 {
        roundtrip_with(b"abcabcabcabc", &opts(code, false, true), &[]);
    }
}

#[test]
fn zeros_emit_one_match_command() {
    let data = vec![0u8; 65536];
    let (stats, _) = roundtrip_with(&data, &StreamOptions::default(), &[]);
    // One match command plus the trailing literals-only command.
    assert_eq!(stats.command_count, 2);
}

#[test]
fn alternating_pattern_compresses_hard() {
    let data: Vec<u8> = (0..1 << 20)
        .map(|i| if i % 2 == 0 { 0xAA } else { 0x55 })
        .collect();
    let (stats, _) = roundtrip_with(&data, &StreamOptions::default(), &[]);
    assert!(stats.compressed_size < stats.original_size / 10);
}

#[test]
fn incompressible_data_round_trips_via_stored_blocks() {
    // xorshift bytes; the frame layer must fall back to stored blocks.
    let mut data = vec![0u8; 100_000];
    let mut x: u32 = 0x9E37_79B9;
    for b in &mut data {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        *b = (x >> 24) as u8;
    }
    let (stats, _) = roundtrip_with(&data, &StreamOptions::default(), &[]);
    // Stored blocks cost 4 bytes of prefix each; no more than that.
    assert!(stats.compressed_size <= stats.original_size + 64);
}

// ─────────────────────────────────────────────────────────────────────────────
// Header behaviour
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn short_inputs_downgrade_the_block_code() {
    let data = lz4opt::lorem::gen_buffer(80_000, 2);
    let (stats, compressed) = roundtrip_with(&data, &StreamOptions::default(), &[]);
    // 80 kB does not fit a 64 KiB block, so the recorded code is 5.
    assert_eq!(stats.block_max_code, 5);
    assert_eq!(compressed[5] >> 4, 5);

    let tiny = lz4opt::lorem::gen_buffer(1000, 2);
    let (stats, _) = roundtrip_with(&tiny, &StreamOptions::default(), &[]);
    assert_eq!(stats.block_max_code, 4);
}

#[test]
fn modern_magic_and_terminator_are_present() {
    let (_, compressed) = roundtrip_with(b"hello hello hello", &StreamOptions::default(), &[]);
    assert_eq!(&compressed[..4], &FRAME_MAGIC);
    assert_eq!(&compressed[compressed.len() - 4..], &[0, 0, 0, 0]);
}

#[test]
fn corrupt_header_checksum_is_rejected() {
    let data = lz4opt::lorem::gen_buffer(5000, 5);
    let mut compressed = Vec::new();
    compress_stream(
        &mut Cursor::new(&data),
        &mut compressed,
        &[],
        &StreamOptions::default(),
    )
    .unwrap();

    compressed[6] ^= 0x40;
    let err = decompress_stream(&mut Cursor::new(&compressed), &mut Vec::<u8>::new(), &[], false)
        .unwrap_err();
    assert!(matches!(err, Error::Checksum));
}

#[test]
fn wrong_magic_is_a_format_error() {
    let err = decompress_stream(
        &mut Cursor::new(b"not an lz4 stream at all"),
        &mut Vec::<u8>::new(),
        &[],
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Format));
}

// ─────────────────────────────────────────────────────────────────────────────
// Legacy frames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn legacy_frames_roundtrip_without_terminator() {
    let data = lz4opt::lorem::gen_buffer(150_000, 8);
    let legacy = StreamOptions {
        legacy_frames: true,
        ..StreamOptions::default()
    };
    let (_, compressed) = roundtrip_with(&data, &legacy, &[]);
    assert_eq!(&compressed[..4], &LEGACY_FRAME_MAGIC);
    // No zero terminator: the stream ends with block payload.
    assert_ne!(&compressed[compressed.len() - 4..], &[0u8, 0, 0, 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn raw_block_roundtrip_and_end_marker() {
    let data = lz4opt::lorem::gen_buffer(30_000, 13);
    let raw = StreamOptions {
        raw_block: true,
        ..StreamOptions::default()
    };
    let (_, compressed) = roundtrip_with(&data, &raw, &[]);
    assert_eq!(&compressed[compressed.len() - 2..], &[0, 0]);
}

#[test]
fn raw_block_rejects_multi_block_input() {
    let data = lz4opt::lorem::gen_buffer(100_000, 13);
    let raw = StreamOptions {
        raw_block: true,
        block_max_code: 4,
        ..StreamOptions::default()
    };
    let err = compress_stream(&mut Cursor::new(&data), &mut Vec::<u8>::new(), &[], &raw).unwrap_err();
    assert!(matches!(err, Error::RawTooLarge));
}

#[test]
fn raw_block_incompressible_input_is_an_error() {
    let mut data = vec![0u8; 8192];
    let mut x: u32 = 0xABCD_EF01;
    for b in &mut data {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        *b = (x >> 16) as u8;
    }
    let raw = StreamOptions {
        raw_block: true,
        ..StreamOptions::default()
    };
    let err = compress_stream(&mut Cursor::new(&data), &mut Vec::<u8>::new(), &[], &raw).unwrap_err();
    assert!(matches!(err, Error::RawIncompressible));
}

// ─────────────────────────────────────────────────────────────────────────────
// Dictionary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dictionary_improves_compression_and_roundtrips() {
    let dict = lz4opt::lorem::gen_buffer(60_000, 77);
    let data = dict[20_000..50_000].to_vec();

    let (plain, _) = roundtrip_with(&data, &StreamOptions::default(), &[]);
    let (seeded, _) = roundtrip_with(&data, &StreamOptions::default(), &dict);
    assert!(seeded.compressed_size < plain.compressed_size / 4);
}

#[test]
fn dictionary_applies_to_independent_blocks_too() {
    let dict = lz4opt::lorem::gen_buffer(60_000, 78);
    // Two 64 KiB blocks, each overlapping the dictionary.
    let mut data = dict[..50_000].to_vec();
    data.extend_from_slice(&dict[..50_000]);
    let independent = StreamOptions {
        block_max_code: 4,
        independent_blocks: true,
        ..StreamOptions::default()
    };
    let (plain, _) = roundtrip_with(&data, &independent, &[]);
    let (seeded, _) = roundtrip_with(&data, &independent, &dict);
    assert!(seeded.compressed_size < plain.compressed_size);
}

// ─────────────────────────────────────────────────────────────────────────────
// Dependent vs independent blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dependent_blocks_compress_repeats_across_boundaries() {
    // Repeated text at a distance under the offset cap: the second copy is
    // a back-reference only when blocks are dependent.
    let chunk = lz4opt::lorem::gen_buffer(60_000, 21);
    let mut data = chunk.clone();
    data.extend_from_slice(&chunk);

    let (dep, _) = roundtrip_with(&data, &opts(4, false, true), &[]);
    let (indep, _) = roundtrip_with(&data, &opts(4, true, true), &[]);
    assert!(dep.compressed_size < indep.compressed_size);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser bias
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn favor_speed_reduces_command_count() {
    let data = lz4opt::lorem::gen_buffer(100_000, 30);
    let (ratio, _) = roundtrip_with(&data, &opts(7, false, true), &[]);
    let (speed, _) = roundtrip_with(&data, &opts(7, false, false), &[]);
    assert!(
        speed.command_count < ratio.command_count,
        "{} commands with speed bias vs {} with ratio bias",
        speed.command_count,
        ratio.command_count
    );
    // Ratio mode never loses to speed mode on size.
    assert!(ratio.compressed_size <= speed.compressed_size);
}

// ─────────────────────────────────────────────────────────────────────────────
// Corruption safety
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn flipped_bits_error_or_stay_bounded() {
    let data = lz4opt::lorem::gen_buffer(4000, 55);
    let mut compressed = Vec::new();
    compress_stream(
        &mut Cursor::new(&data),
        &mut compressed,
        &[],
        &StreamOptions::default(),
    )
    .unwrap();

    for bit in 0..compressed.len() * 8 {
        let mut corrupt = compressed.clone();
        corrupt[bit / 8] ^= 1 << (bit % 8);
        let mut out = Vec::new();
        // Each decodable block needs a 4-byte prefix and at least one
        // payload byte, and can expand to at most one block size.
        let bound = (corrupt.len() as u64 / 5 + 1) * 64 * 1024;
        match decompress_stream(&mut Cursor::new(&corrupt), &mut out, &[], false) {
            Ok(stats) => assert!(stats.original_size <= bound),
            Err(_) => {}
        }
    }
}
