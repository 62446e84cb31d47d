//! Thin wrapper around the `xxhash-rust` crate exposing the XXH32 call this
//! crate needs (the frame-header checksum byte).

/// One-shot XXH32 hash of `data` with the given `seed`.
///
/// Known-answer: `xxh32_oneshot(b"", 0) == 0x02CC5D05`.
#[inline]
pub fn xxh32_oneshot(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}
