//! Sequential stream helpers.
//!
//! The drivers only need sequential reads and writes, so they work directly
//! over `std::io::Read` / `Write`.  This module adds the two pieces std does
//! not provide: a short-read-tolerant full-buffer reader (block loops need
//! "fill or EOF" semantics, not "fill or fail"), and a comparison sink that
//! verifies a decompressed stream against a reference reader instead of
//! storing it.

use std::io::{self, Read, Write};

/// Read into `buf` until it is full or the source reaches EOF.
///
/// Returns the number of bytes read; anything short of `buf.len()` means
/// EOF was hit.  `Interrupted` reads are retried.
pub fn read_fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// A `Write` sink that compares everything written to it against the bytes
/// of a reference reader.
///
/// Used by verify-after-compress: the compressed stream is decompressed
/// into this sink, which fails on the first diverging byte.  Call
/// [`CompareSink::finish`] afterwards to ensure the reference was fully
/// consumed.
pub struct CompareSink<R: Read> {
    reference: R,
    chunk: Vec<u8>,
    compared: u64,
}

impl<R: Read> CompareSink<R> {
    pub fn new(reference: R) -> Self {
        CompareSink {
            reference,
            chunk: Vec::new(),
            compared: 0,
        }
    }

    /// Total number of bytes compared so far.
    pub fn compared(&self) -> u64 {
        self.compared
    }

    /// Verify the reference stream has no bytes left.
    pub fn finish(mut self) -> io::Result<u64> {
        let mut probe = [0u8; 1];
        if read_fill(&mut self.reference, &mut probe)? != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("decompressed stream is shorter than the original ({} bytes)", self.compared),
            ));
        }
        Ok(self.compared)
    }
}

impl<R: Read> Write for CompareSink<R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.chunk.resize(buf.len(), 0);
        let got = read_fill(&mut self.reference, &mut self.chunk)?;
        if got != buf.len() || self.chunk[..got] != *buf {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("decompressed data differs from the original near byte {}", self.compared),
            ));
        }
        self.compared += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
