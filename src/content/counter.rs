//! Per-file letter counting
//!
//! Streams a file through a buffered reader and records every byte into a
//! histogram. Open and read failures are reported as `FileAccessFailed`
//! naming the path.

use crate::config::CountMode;
use crate::error::{Result, RingError};
use crate::protocol::Histogram;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// Read buffer size for counting
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Count the letters of one file
pub fn count_file(path: &Path, mode: CountMode) -> Result<Histogram> {
    let file = File::open(path).map_err(|source| RingError::FileAccessFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    let histogram = count_reader(&mut reader, mode).map_err(|source| {
        RingError::FileAccessFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    trace!(path = %path.display(), total = histogram.total, "Counted file");
    Ok(histogram)
}

/// Count the letters of everything a reader yields
pub fn count_reader<R: BufRead>(reader: &mut R, mode: CountMode) -> std::io::Result<Histogram> {
    let mut histogram = Histogram::new();
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        histogram.record_all(chunk, mode);
        let consumed = chunk.len();
        reader.consume(consumed);
    }
    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_count_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(&path, "aAbB12").unwrap();

        let h = count_file(&path, CountMode::AllBytes).unwrap();
        assert_eq!(h.total, 6);
        assert_eq!(h.count('a'), 2);
        assert_eq!(h.count('b'), 2);
        assert_eq!(h.letters_total(), 4);

        let h = count_file(&path, CountMode::Letters).unwrap();
        assert_eq!(h.total, 4);
    }

    #[test]
    fn test_count_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();
        assert_eq!(count_file(&path, CountMode::AllBytes).unwrap(), Histogram::new());
    }

    #[test]
    fn test_missing_file_is_access_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = count_file(&path, CountMode::AllBytes).unwrap_err();
        match err {
            RingError::FileAccessFailed { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_count_reader_spans_buffers() {
        let text = "xyz".repeat(10_000);
        let mut reader = BufReader::with_capacity(7, Cursor::new(text.clone()));
        let h = count_reader(&mut reader, CountMode::AllBytes).unwrap();
        assert_eq!(h.total, text.len() as u64);
        assert_eq!(h.count('x'), 10_000);
        assert_eq!(h.count('z'), 10_000);
    }
}
