//! Whole-index persistence.
//!
//! The complete [`OrderedIndex`] is saved as one snapshot file at the end of
//! a run and loaded back at the start of the next. A snapshot that is
//! missing, unreadable, corrupt or from another format version is never
//! fatal: loading falls back to an empty index and reports why.
//!
//! ## Snapshot layout
//!
//! ```text
//! magic    "WTRK"
//! version  u16 LE
//! count    u32 LE   number of entries
//! length   u64 LE   payload length
//! payload  per entry, in pre-order: shape byte, then the encoded entry
//! crc32    u32 LE   CRC-32 of the payload
//! ```
//!
//! The shape byte records which children a node has, so the exact tree is
//! rebuilt on load (same height, same traversal orders).

pub mod codec;
pub mod reader;
pub mod writer;

pub use codec::{ByteReader, SnapshotEntry};
pub use reader::{decode_snapshot, read_snapshot};
pub use writer::{encode_snapshot, write_snapshot};

use crate::tree::{OrderedIndex, ShapeError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SNAPSHOT_MAGIC: [u8; 4] = *b"WTRK";
pub const SNAPSHOT_VERSION: u16 = 1;
/// magic + version + count + payload length
pub const HEADER_LEN: usize = 4 + 2 + 4 + 8;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("not a snapshot file")]
    BadMagic,
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
    #[error("snapshot checksum mismatch (stored {stored:08x}, computed {computed:08x})")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("snapshot is truncated")]
    Truncated,
    #[error("snapshot is malformed: {0}")]
    Malformed(String),
    #[error("snapshot tree is invalid: {0}")]
    Shape(#[from] ShapeError),
}

/// What happened when the repository was opened
#[derive(Debug)]
pub enum LoadOutcome {
    /// A snapshot was read; the index holds this many entries
    Loaded { entries: usize },
    /// No snapshot exists yet
    Missing,
    /// A snapshot exists but could not be used; the index starts empty
    Discarded(SnapshotError),
}

/// Snapshot file holding a persisted index
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted index, substituting an empty one on any failure
    pub fn load<K: SnapshotEntry + Ord>(&self) -> (OrderedIndex<K>, LoadOutcome) {
        match read_snapshot(&self.path) {
            Ok(index) => {
                let entries = index.len();
                (index, LoadOutcome::Loaded { entries })
            }
            Err(SnapshotError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                (OrderedIndex::new(), LoadOutcome::Missing)
            }
            Err(e) => (OrderedIndex::new(), LoadOutcome::Discarded(e)),
        }
    }

    /// Replace the persisted index with `index`
    pub fn save<K: SnapshotEntry>(&self, index: &OrderedIndex<K>) -> Result<(), SnapshotError> {
        write_snapshot(&self.path, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::WordRecord;
    use std::fs;
    use tempfile::TempDir;

    fn record(word: &str, hits: &[(&str, u32)]) -> WordRecord {
        let mut record = WordRecord::new(word).unwrap();
        for &(file, line) in hits {
            record.add_occurrence(file, line);
        }
        record
    }

    fn sample_index() -> OrderedIndex<WordRecord> {
        let mut index = OrderedIndex::new();
        index.add(record("apple", &[("test1.txt", 1), ("test1.txt", 3)]));
        index.add(record("banana", &[("test2.txt", 2), ("test2.txt", 5)]));
        index.add(record("cherry", &[("test1.txt", 4)]));
        index.add(record("aardvark", &[("test3.txt", 9), ("test3.txt", 9)]));
        index
    }

    fn summary(index: &OrderedIndex<WordRecord>) -> Vec<(String, u64, Vec<(String, Vec<u32>)>)> {
        index
            .in_order()
            .map(|r| {
                let files = r
                    .occurrences()
                    .iter()
                    .map(|o| (o.filename.clone(), o.lines.clone()))
                    .collect();
                (r.word().to_string(), r.total_frequency(), files)
            })
            .collect()
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(dir.path().join("repository.ser"));
        let index = sample_index();

        repo.save(&index).unwrap();
        let (loaded, outcome) = repo.load::<WordRecord>();

        assert!(matches!(outcome, LoadOutcome::Loaded { entries: 4 }));
        assert_eq!(loaded.len(), index.len());
        assert_eq!(loaded.height(), index.height());
        assert_eq!(summary(&loaded), summary(&index));
    }

    #[test]
    fn test_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(dir.path().join("absent.ser"));
        let (index, outcome) = repo.load::<WordRecord>();
        assert!(index.is_empty());
        assert!(matches!(outcome, LoadOutcome::Missing));
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repository.ser");
        let repo = Repository::new(&path);
        repo.save(&sample_index()).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 5;
        bytes[last] ^= 0xFF;
        fs::write(&path, &bytes).unwrap();

        let (index, outcome) = repo.load::<WordRecord>();
        assert!(index.is_empty());
        assert!(matches!(
            outcome,
            LoadOutcome::Discarded(SnapshotError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_foreign_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repository.ser");
        fs::write(&path, b"PK\x03\x04 some other archive").unwrap();

        let (index, outcome) = Repository::new(&path).load::<WordRecord>();
        assert!(index.is_empty());
        assert!(matches!(outcome, LoadOutcome::Discarded(SnapshotError::BadMagic)));
    }

    #[test]
    fn test_unwritable_location() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(dir.path().join("no-such-dir").join("repository.ser"));
        assert!(matches!(repo.save(&sample_index()), Err(SnapshotError::Io(_))));
    }
}
