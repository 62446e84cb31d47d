//! Dictionary prefix loading.
//!
//! A dictionary seeds the match history ahead of the first block, letting
//! small inputs with known structure compress against shared context.  Only
//! the final 64 KiB of the file matter — anything further back could never
//! be referenced by a 16-bit offset.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::block::HISTORY_SIZE;
use crate::error::Error;

/// Load the usable tail of a dictionary file.
///
/// Returns at most [`HISTORY_SIZE`] bytes: the whole file when it is small
/// enough, otherwise its trailing window.
pub fn load(path: &Path) -> Result<Vec<u8>, Error> {
    let mut file = File::open(path).map_err(Error::Dictionary)?;
    let file_size = file
        .seek(SeekFrom::End(0))
        .map_err(Error::Dictionary)?;

    let start = file_size.saturating_sub(HISTORY_SIZE as u64);
    file.seek(SeekFrom::Start(start)).map_err(Error::Dictionary)?;

    let mut data = Vec::with_capacity((file_size - start) as usize);
    file.read_to_end(&mut data).map_err(Error::Dictionary)?;
    data.truncate(HISTORY_SIZE);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn small_dictionary_loads_whole() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"dictionary contents").unwrap();
        let data = load(f.path()).unwrap();
        assert_eq!(data, b"dictionary contents");
    }

    #[test]
    fn large_dictionary_keeps_the_tail() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        let mut contents = vec![b'A'; HISTORY_SIZE];
        contents.extend_from_slice(b"tail-marker");
        f.write_all(&contents).unwrap();

        let data = load(f.path()).unwrap();
        assert_eq!(data.len(), HISTORY_SIZE);
        assert!(data.ends_with(b"tail-marker"));
    }

    #[test]
    fn missing_file_is_a_dictionary_error() {
        let err = load(Path::new("/nonexistent/dictionary.bin")).unwrap_err();
        assert!(matches!(err, Error::Dictionary(_)));
    }
}
