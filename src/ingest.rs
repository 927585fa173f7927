//! Text ingestion: lines to words to index updates.

use crate::record::WordRecord;
use crate::tree::{IndexError, OrderedIndex};
use crate::utils::extract_words;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Failed to read {source_name}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Key(#[from] IndexError),
}

/// Counters for one ingested source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines_read: u32,
    pub words: usize,
    pub new_words: usize,
}

impl IngestStats {
    fn merge(&mut self, other: IngestStats) {
        self.lines_read = self.lines_read.max(other.lines_read);
        self.words += other.words;
        self.new_words += other.new_words;
    }
}

/// Record every word on one line of `source`
pub fn ingest_line(
    index: &mut OrderedIndex<WordRecord>,
    source: &str,
    line_number: u32,
    line: &str,
) -> Result<IngestStats, IndexError> {
    let mut stats = IngestStats {
        lines_read: line_number,
        ..Default::default()
    };

    for word in extract_words(line) {
        stats.words += 1;

        if let Some(record) = index.search_mut(word.as_str()) {
            record.add_occurrence(source, line_number);
            continue;
        }

        let mut record = WordRecord::new(&word)?;
        record.add_occurrence(source, line_number);
        index.add(record);
        stats.new_words += 1;
    }

    Ok(stats)
}

/// Ingest every line of `reader`, numbering lines from 1.
///
/// Lines end at `\n` with an optional `\r` before it. Invalid UTF-8 is
/// replaced rather than rejected; the tokenizer drops non-ASCII anyway.
pub fn ingest_reader<R: BufRead>(
    index: &mut OrderedIndex<WordRecord>,
    source: &str,
    mut reader: R,
) -> Result<IngestStats, IngestError> {
    let mut stats = IngestStats::default();
    let mut buf = Vec::new();
    let mut line_number = 0u32;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| IngestError::Read {
                source_name: source.to_string(),
                source: e,
            })?;
        if read == 0 {
            break;
        }

        line_number += 1;
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        stats.merge(ingest_line(index, source, line_number, &line)?);
    }

    stats.lines_read = line_number;
    Ok(stats)
}

/// Ingest a file, recording its occurrences under the path as given
pub fn ingest_file(
    index: &mut OrderedIndex<WordRecord>,
    path: &Path,
) -> Result<IngestStats, IngestError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(IngestError::InputNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(IngestError::Read {
                source_name: path.display().to_string(),
                source,
            });
        }
    };

    let name = path.to_string_lossy();
    ingest_reader(index, &name, BufReader::new(file))
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
