//! # wordtrack - persistent word index
//!
//! wordtrack reads text files and records, for every distinct word, the
//! files and line numbers it occurs on and how many times it has been seen.
//! The index is saved between runs, so each invocation extends what earlier
//! ones collected.
//!
//! ## Architecture
//!
//! - [`tree`] - Generic unbalanced binary search tree with buffered traversals
//! - [`record`] - Per-word occurrence records and their report layouts
//! - [`ingest`] - Line tokenization and index updates
//! - [`repository`] - Whole-index binary snapshots
//! - [`output`] - Report writing and console diagnostics
//! - [`tracker`] - The per-run context tying the above together
//! - [`utils`] - Tokenizer, integer encoding, configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use wordtrack::output::OutputMode;
//! use wordtrack::repository::Repository;
//! use wordtrack::tracker::Tracker;
//!
//! let (mut tracker, _outcome) = Tracker::open(Repository::new("repository.ser"));
//! tracker.ingest_file(Path::new("input.txt")).unwrap();
//! tracker.save().unwrap();
//! tracker.report(OutputMode::Lines, &mut std::io::stdout()).unwrap();
//! ```
//!
//! ## Complexity
//!
//! The tree is deliberately not rebalanced. Words arriving in sorted order
//! build a chain whose height equals its size, making lookups linear; every
//! walk is iterative so such chains cost time but never stack.

pub mod ingest;
pub mod output;
pub mod record;
pub mod repository;
pub mod tracker;
pub mod tree;
pub mod utils;
