//! Index module for Yari.
//!
//! This module provides the core indexing functionality: posting lists,
//! the in-memory inverted index accumulator, the document indexing
//! pipeline, and the bridge that merges accumulated postings into the
//! persistent store.

pub mod builder;
pub mod inverted;
pub mod posting;
pub mod updater;

use serde::{Deserialize, Serialize};

use crate::codec::Compression;

// Re-export commonly used types
pub use builder::DocumentIndexer;
pub use inverted::{InvertedIndex, PostingsEntry, TokenId};
pub use posting::{Posting, PostingList};
pub use updater::PostingsUpdater;

/// Configuration for the indexing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Width of the N-gram window in code points.
    pub n: usize,

    /// Compression applied to stored posting lists.
    ///
    /// Must stay stable for the lifetime of a database; blobs written with
    /// one mode cannot be read with the other.
    pub compression: Compression,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            n: 2,
            compression: Compression::None,
        }
    }
}
