//! LZ4 frame container.
//!
//! The core produces and consumes raw blocks; this module is the thin layer
//! that delimits them in a byte stream.  See [`header`] for the exact wire
//! layout of both the modern and the legacy flavour.

pub mod header;

pub use header::{
    block_max_size, decode_block_prefix, decode_stream_header, encode_block_prefix,
    encode_end_marker, encode_stream_header, StreamHeader, BLOCK_PREFIX_SIZE, FRAME_MAGIC,
    HEADER_SIZE, LEGACY_BLOCK_MAX_SIZE, LEGACY_FRAME_MAGIC, LEGACY_HEADER_SIZE,
};
