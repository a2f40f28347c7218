//! Directory listing
//!
//! The file list is read once, before the ring is built, so every rank
//! inherits the same ordered list and can index into it with its partition.

use crate::config::CountMode;
use crate::content::counter::count_file;
use crate::error::{Result, RingError};
use crate::protocol::Histogram;
use crate::ring::{assigned_indices, RingPosition};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ordered set of regular files found in one directory
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    /// Directory the files were listed from
    dir: PathBuf,

    /// Full paths, sorted by file name
    files: Vec<PathBuf>,
}

impl FileSet {
    /// List the regular files of `dir`
    ///
    /// Subdirectories and other non-regular entries are skipped. Names are
    /// sorted so that repeated runs see the same order.
    pub fn scan(dir: &Path) -> Result<Self> {
        let access_failed = |source| RingError::FileAccessFailed {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(access_failed)? {
            let entry = entry.map_err(access_failed)?;
            let path = entry.path();
            // Follows symlinks, so a link to a regular file is counted
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => debug!(path = %path.display(), "Skipping non-regular entry"),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable entry"),
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(dir = %dir.display(), files = files.len(), "Listed directory");
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(PathBuf::as_path)
    }

    /// Files assigned to a ring position, in index order
    pub fn assigned(&self, position: RingPosition) -> impl Iterator<Item = &Path> + '_ {
        assigned_indices(self.files.len(), position.rank, position.ring_size)
            .map(move |i| self.files[i].as_path())
    }

    /// Sum of the per-file histograms of this position's share
    pub fn local_histogram(&self, position: RingPosition, mode: CountMode) -> Result<Histogram> {
        let mut local = Histogram::new();
        for path in self.assigned(position) {
            local.merge(&count_file(path, mode)?);
        }
        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Rank;
    use tempfile::tempdir;

    fn position(rank: usize, ring_size: usize) -> RingPosition {
        RingPosition::new(Rank::new(rank).unwrap(), ring_size)
    }

    #[test]
    fn test_scan_sorts_and_skips_directories() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "bbb").unwrap();
        std::fs::write(dir.path().join("a.txt"), "aaa").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let set = FileSet::scan(dir.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().file_name().unwrap(), "a.txt");
        assert_eq!(set.get(1).unwrap().file_name().unwrap(), "b.txt");
        assert_eq!(set.dir(), dir.path());
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        let err = FileSet::scan(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, RingError::FileAccessFailed { .. }));
    }

    #[test]
    fn test_local_histograms_sum_to_whole() {
        let dir = tempdir().unwrap();
        let contents = ["apple", "banana", "cherry", "date", "elderberry", "fig", "grape"];
        for (i, text) in contents.iter().enumerate() {
            std::fs::write(dir.path().join(format!("{i:02}.txt")), text).unwrap();
        }
        let set = FileSet::scan(dir.path()).unwrap();

        let whole = set
            .local_histogram(position(1, 1), CountMode::AllBytes)
            .unwrap();
        for ring_size in 1..=9 {
            let summed: Histogram = (1..=ring_size)
                .map(|r| {
                    set.local_histogram(position(r, ring_size), CountMode::AllBytes)
                        .unwrap()
                })
                .sum();
            assert_eq!(summed, whole, "ring of {}", ring_size);
        }
    }

    #[test]
    fn test_two_files_two_ranks() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a"), "aaa").unwrap();
        std::fs::write(dir.path().join("b"), "bbb").unwrap();
        let set = FileSet::scan(dir.path()).unwrap();

        let first = set.local_histogram(position(1, 2), CountMode::AllBytes).unwrap();
        let second = set.local_histogram(position(2, 2), CountMode::AllBytes).unwrap();
        assert_eq!((first.count('a'), first.count('b')), (3, 0));
        assert_eq!((second.count('a'), second.count('b')), (0, 3));
        assert!(!set.is_empty());
    }
}
