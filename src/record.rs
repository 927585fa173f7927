//! Per-word occurrence records.
//!
//! A [`WordRecord`] is keyed on its case-folded word alone; every other
//! field is payload that ingestion mutates in place while the record sits in
//! the index.

use crate::tree::IndexError;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Line numbers recorded for one file, in the order first seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOccurrences {
    pub filename: String,
    pub lines: Vec<u32>,
}

/// All occurrences of one normalized word across every ingested file
#[derive(Debug, Clone)]
pub struct WordRecord {
    word: String,
    occurrences: Vec<FileOccurrences>,
    total_frequency: u64,
}

impl WordRecord {
    /// Create an empty record for `raw`, case-folding it once.
    ///
    /// Text that folds to nothing cannot key a record.
    pub fn new(raw: &str) -> Result<Self, IndexError> {
        let word = raw.to_lowercase();
        if word.is_empty() {
            return Err(IndexError::MissingKey);
        }

        Ok(Self {
            word,
            occurrences: Vec::new(),
            total_frequency: 0,
        })
    }

    /// Reassemble a record from persisted parts without re-normalizing
    pub(crate) fn from_parts(
        word: String,
        occurrences: Vec<FileOccurrences>,
        total_frequency: u64,
    ) -> Self {
        Self {
            word,
            occurrences,
            total_frequency,
        }
    }

    /// Record that the word was seen in `filename` on `line`.
    ///
    /// The line is stored once per file, but the total frequency counts
    /// every call, repeated lines included.
    pub fn add_occurrence(&mut self, filename: &str, line: u32) {
        let position = self
            .occurrences
            .iter()
            .position(|entry| entry.filename == filename);

        let entry = match position {
            Some(i) => &mut self.occurrences[i],
            None => {
                self.occurrences.push(FileOccurrences {
                    filename: filename.to_string(),
                    lines: Vec::new(),
                });
                let last = self.occurrences.len() - 1;
                &mut self.occurrences[last]
            }
        };

        if !entry.lines.contains(&line) {
            entry.lines.push(line);
        }

        self.total_frequency += 1;
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn total_frequency(&self) -> u64 {
        self.total_frequency
    }

    /// Number of distinct lines in `filename` holding the word (0 if none)
    pub fn frequency_in_file(&self, filename: &str) -> usize {
        self.line_numbers(filename).map_or(0, <[u32]>::len)
    }

    /// Files the word appears in, first-touched first
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.occurrences.iter().map(|entry| entry.filename.as_str())
    }

    pub fn line_numbers(&self, filename: &str) -> Option<&[u32]> {
        self.occurrences
            .iter()
            .find(|entry| entry.filename == filename)
            .map(|entry| entry.lines.as_slice())
    }

    pub fn occurrences(&self) -> &[FileOccurrences] {
        &self.occurrences
    }

    /// `Key = ===word=== found in file: a.txt, b.txt`
    pub fn render_files(&self) -> String {
        let mut out = format!("Key = ==={}===", self.word);
        for (i, filename) in self.filenames().enumerate() {
            out.push_str(if i == 0 { " found in file: " } else { ", " });
            out.push_str(filename);
        }
        out
    }

    /// `Key = ===word=== found in file: a.txt on lines: 1,2,`
    pub fn render_lines(&self) -> String {
        let mut out = format!("Key = ==={}===", self.word);
        self.push_locations(&mut out);
        out
    }

    /// `===word=== number of entries: 3 found in file: a.txt on lines: 1,2,`
    pub fn render_complete(&self) -> String {
        let mut out = format!(
            "==={}=== number of entries: {}",
            self.word, self.total_frequency
        );
        self.push_locations(&mut out);
        out
    }

    fn push_locations(&self, out: &mut String) {
        for entry in &self.occurrences {
            out.push_str(" found in file: ");
            out.push_str(&entry.filename);
            out.push_str(" on lines: ");
            for line in &entry.lines {
                out.push_str(&line.to_string());
                out.push(',');
            }
        }
    }
}

impl fmt::Display for WordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (frequency: {})", self.word, self.total_frequency)
    }
}

impl PartialEq for WordRecord {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for WordRecord {}

impl PartialOrd for WordRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WordRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

impl Hash for WordRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl Borrow<str> for WordRecord {
    fn borrow(&self) -> &str {
        &self.word
    }
}
