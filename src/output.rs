//! Report rendering and console diagnostics.
//!
//! Reports go to stdout or a file and must be byte-exact, so they are never
//! colored. Status and warning lines go to stderr through `termcolor`.

use crate::record::WordRecord;
use crate::tree::OrderedIndex;
use anyhow::Result;
use clap::ValueEnum;
use std::fmt::Display;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Report layout, selected with `-pf`, `-pl` or `-po`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Words and the files they appear in
    #[value(name = "f")]
    Files,
    /// Words, files and line numbers
    #[value(name = "l")]
    Lines,
    /// Words, total occurrences, files and line numbers
    #[value(name = "o")]
    Occurrences,
}

impl OutputMode {
    /// The command-line spelling of this mode
    pub fn flag(self) -> &'static str {
        match self {
            OutputMode::Files => "-pf",
            OutputMode::Lines => "-pl",
            OutputMode::Occurrences => "-po",
        }
    }

    pub fn render(self, record: &WordRecord) -> String {
        match self {
            OutputMode::Files => record.render_files(),
            OutputMode::Lines => record.render_lines(),
            OutputMode::Occurrences => record.render_complete(),
        }
    }
}

/// Write one line per record, in ascending word order.
///
/// Returns the number of lines written.
pub fn write_report<W: Write>(
    index: &OrderedIndex<WordRecord>,
    mode: OutputMode,
    out: &mut W,
) -> Result<usize> {
    let mut cursor = index.in_order();
    let mut written = 0;

    while cursor.has_next() {
        let record = cursor.next_entry()?;
        writeln!(out, "{}", mode.render(record))?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}

/// When to color diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Prefixed status and warning lines on stderr
pub struct Console {
    stderr: StandardStream,
    quiet: bool,
}

impl Console {
    pub fn new(color: ColorMode, quiet: bool) -> Self {
        Self {
            stderr: StandardStream::stderr(color.into()),
            quiet,
        }
    }

    /// Progress line, suppressed by `--quiet`
    pub fn status(&mut self, message: impl Display) {
        if self.quiet {
            return;
        }
        let _ = self.prefixed("wordtrack:", ColorSpec::new().set_bold(true), message);
    }

    /// Recoverable problem; always shown
    pub fn warn(&mut self, message: impl Display) {
        let _ = self.prefixed(
            "warning:",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        );
    }

    fn prefixed(&mut self, prefix: &str, spec: &ColorSpec, message: impl Display) -> std::io::Result<()> {
        self.stderr.set_color(spec)?;
        write!(self.stderr, "{}", prefix)?;
        self.stderr.reset()?;
        writeln!(self.stderr, " {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest_reader;

    fn kitty_index() -> OrderedIndex<WordRecord> {
        let mut index = OrderedIndex::new();
        let text = "Hello, my name is Kitty.\nHello Kitty, it's nice to meet you!\n";
        ingest_reader(&mut index, "t.txt", text.as_bytes()).unwrap();
        index
    }

    fn report(mode: OutputMode) -> Vec<String> {
        let mut out = Vec::new();
        write_report(&kitty_index(), mode, &mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn test_files_report() {
        let lines = report(OutputMode::Files);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Key = ===hello=== found in file: t.txt");
        assert_eq!(lines[9], "Key = ===you=== found in file: t.txt");
    }

    #[test]
    fn test_lines_report() {
        let lines = report(OutputMode::Lines);
        assert_eq!(lines[0], "Key = ===hello=== found in file: t.txt on lines: 1,2,");
        assert_eq!(lines[1], "Key = ===is=== found in file: t.txt on lines: 1,");
    }

    #[test]
    fn test_occurrences_report() {
        let lines = report(OutputMode::Occurrences);
        assert_eq!(
            lines[3],
            "===kitty=== number of entries: 2 found in file: t.txt on lines: 1,2,"
        );
    }

    #[test]
    fn test_report_is_ascending() {
        let words: Vec<String> = report(OutputMode::Files)
            .iter()
            .map(|l| l.split("===").nth(1).unwrap().to_string())
            .collect();
        let mut sorted = words.clone();
        sorted.sort();
        assert_eq!(words, sorted);
        assert_eq!(
            words,
            vec!["hello", "is", "its", "kitty", "meet", "my", "name", "nice", "to", "you"]
        );
    }

    #[test]
    fn test_empty_report() {
        let index = OrderedIndex::new();
        let mut out = Vec::new();
        assert_eq!(write_report(&index, OutputMode::Lines, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_mode_flags() {
        assert_eq!(OutputMode::Files.flag(), "-pf");
        assert_eq!(OutputMode::Lines.flag(), "-pl");
        assert_eq!(OutputMode::Occurrences.flag(), "-po");
    }
}
