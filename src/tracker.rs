//! The per-invocation context.
//!
//! A [`Tracker`] owns the word index for the lifetime of one run: it is
//! opened from the repository, fed input files, saved back and reported on.

use crate::ingest::{self, IngestError, IngestStats};
use crate::output::{self, OutputMode};
use crate::record::WordRecord;
use crate::repository::{LoadOutcome, Repository, SnapshotError};
use crate::tree::OrderedIndex;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub struct Tracker {
    repository: Repository,
    index: OrderedIndex<WordRecord>,
}

impl Tracker {
    /// Load the repository's index, or start empty if it has none usable
    pub fn open(repository: Repository) -> (Self, LoadOutcome) {
        let (index, outcome) = repository.load();
        (Self { repository, index }, outcome)
    }

    pub fn index(&self) -> &OrderedIndex<WordRecord> {
        &self.index
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn ingest_file(&mut self, path: &Path) -> Result<IngestStats, IngestError> {
        ingest::ingest_file(&mut self.index, path)
    }

    /// Persist the whole index
    pub fn save(&self) -> Result<(), SnapshotError> {
        self.repository.save(&self.index)
    }

    pub fn report<W: Write>(&self, mode: OutputMode, out: &mut W) -> Result<usize> {
        output::write_report(&self.index, mode, out)
    }
}
