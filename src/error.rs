//! Crate-wide status type.
//!
//! One flat error enum covers every failure the compressor, decompressor, and
//! stream drivers can surface.  The CLI maps all of them onto a single
//! non-zero exit code, so the enum's job is diagnostics, not recovery
//! strategy.
//!
//! Note that "this block is incompressible" is deliberately *not* an error:
//! the block emitter reports it through [`crate::block::BlockOutcome`] and the
//! frame layer either falls back to a stored block or, in raw-block mode,
//! turns it into [`Error::RawIncompressible`].

use std::fmt;

/// High-level status for compression and decompression operations.
#[derive(Debug)]
pub enum Error {
    /// Error reading from the input stream.
    SourceRead(std::io::Error),
    /// Error writing to the output stream.
    SinkWrite(std::io::Error),
    /// Error reading the dictionary file.
    Dictionary(std::io::Error),
    /// Buffer allocation failed during context construction.
    OutOfMemory,
    /// Invariant breach inside the block emitter (e.g. an offset outside
    /// `1..=65535` reached serialisation).  Indicates a bug, not bad input.
    InternalCompression,
    /// Raw-block mode accepts a single block of at most 4 MiB.
    RawTooLarge,
    /// Raw-block mode has no stored-block fallback for incompressible data.
    RawIncompressible,
    /// Invalid magic number, version bits, or reserved bits when decoding.
    Format,
    /// Frame header checksum mismatch.
    Checksum,
    /// Malformed or truncated block data detected while decompressing.
    InternalDecompression,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceRead(e) => write!(f, "error reading input: {}", e),
            Error::SinkWrite(e) => write!(f, "error writing output: {}", e),
            Error::Dictionary(e) => write!(f, "error reading dictionary: {}", e),
            Error::OutOfMemory => write!(f, "out of memory"),
            Error::InternalCompression => write!(f, "internal compression error"),
            Error::RawTooLarge => {
                write!(f, "raw blocks can only hold a single block of up to 4 MiB")
            }
            Error::RawIncompressible => {
                write!(f, "data is incompressible, raw blocks only support compressed data")
            }
            Error::Format => write!(f, "invalid magic number, version, flags, or block size"),
            Error::Checksum => write!(f, "invalid header checksum"),
            Error::InternalDecompression => write!(f, "corrupted compressed data"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SourceRead(e) | Error::SinkWrite(e) | Error::Dictionary(e) => Some(e),
            _ => None,
        }
    }
}
