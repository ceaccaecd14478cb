//! Text analysis module for Yari.
//!
//! This module provides the text segmentation used at indexing and query
//! time: a separator table over Unicode code points and a lazy N-gram
//! splitter that walks a decoded text buffer one code point at a time.

pub mod ngram;
pub mod separator;

// Re-export for convenient access
pub use ngram::{Ngram, NgramSplit};
pub use separator::is_separator;
