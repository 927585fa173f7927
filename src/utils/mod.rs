//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file location and loading
//! - [`encoding`] - LEB128 varints and length-prefixed strings
//! - [`tokenizer`] - Line to word splitting
//!
//! ## Key Functions
//!
//! ```
//! use wordtrack::utils::extract_words;
//!
//! let words = extract_words("Hello, my name is Kitty.");
//! assert_eq!(words, vec!["hello", "my", "name", "is", "kitty"]);
//! ```

pub mod app_data;
pub mod encoding;
pub mod tokenizer;

pub use app_data::*;
pub use encoding::*;
pub use tokenizer::*;
