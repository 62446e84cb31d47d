//! `lz4opt` — an optimal compressor for the LZ4 block format.
//!
//! Streams produced here decode with any stock LZ4 decoder; the command
//! sequence is chosen to be minimal in size and, secondarily, minimal in
//! command count, so the output also decodes faster than a greedy parse.
//!
//! # Crate layout
//!
//! | Module       | Contents |
//! |--------------|----------|
//! | `block`      | The core: suffix/LCP index, match finder, optimal parser, peephole reducer, block emitter, verification decoder. |
//! | `frame`      | LZ4 frame container (modern + legacy), block prefixes, header checksum. |
//! | `io`         | Stream/file drivers: block loops, history shifting, stored-block fallback. |
//! | `inmem`      | One-shot buffer-to-buffer API and the decompressed-size bound. |
//! | `stream`     | Sequential stream helpers (full-buffer reads, comparison sink). |
//! | `dictionary` | Dictionary prefix loading. |
//! | `bench`      | `-cbench` / `-dbench` throughput measurement. |
//! | `selftest`   | `-test` battery. |
//! | `cli`        | Argument parsing, usage text, display macros. |
//! | `lorem`      | Deterministic text generator (bench + self-test corpus). |
//! | `xxhash`     | XXH32 wrapper (header checksum). |
//! | `timefn`     | Monotonic timer. |
//! | `config`     | Compile-time defaults. |
//! | `error`      | Crate-wide error taxonomy. |

pub mod bench;
pub mod block;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod frame;
pub mod inmem;
pub mod io;
pub mod lorem;
pub mod selftest;
pub mod stream;
pub mod timefn;
pub mod xxhash;

pub use block::{BlockOutcome, Compressor, Settings};
pub use error::Error;
pub use io::{
    compress_file, compress_stream, decompress_file, decompress_stream, verify_file,
    CompressStats, DecompressStats, StreamOptions,
};
