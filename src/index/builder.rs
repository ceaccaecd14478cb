//! Document indexing pipeline.
//!
//! Streams N-grams over decoded text, accumulates them into a transient
//! in-memory index through the token store, and flushes the result into
//! the persistent postings store one token at a time.

use std::sync::Arc;

use crate::analysis::NgramSplit;
use crate::error::{Result, YariError};
use crate::index::IndexConfig;
use crate::index::inverted::InvertedIndex;
use crate::index::updater::PostingsUpdater;
use crate::store::traits::{PostingsStore, TokenStore};

/// Indexes documents end to end: analysis, accumulation, persistence.
///
/// The pipeline is single-threaded; one document is processed to
/// completion before the next begins.
#[derive(Debug, Clone)]
pub struct DocumentIndexer {
    tokens: Arc<dyn TokenStore>,
    updater: PostingsUpdater,
    config: IndexConfig,
}

impl DocumentIndexer {
    /// Create a new indexer over the given stores.
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        postings: Arc<dyn PostingsStore>,
        config: IndexConfig,
    ) -> Self {
        let updater = PostingsUpdater::new(postings, config.compression);
        DocumentIndexer {
            tokens,
            updater,
            config,
        }
    }

    /// The configuration this indexer was created with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The persistence bridge, also usable for query-time fetches.
    pub fn updater(&self) -> &PostingsUpdater {
        &self.updater
    }

    /// Build a transient inverted index from one text.
    ///
    /// `document_id` 0 selects query mode: tokens shorter than the N-gram
    /// width at separator boundaries are kept, and the token store is
    /// consulted in lookup-only mode. Any other id selects index mode,
    /// which discards the short tails.
    pub fn build_index(&self, document_id: u32, text: &str) -> Result<InvertedIndex> {
        let mut index = InvertedIndex::new();
        self.merge_into(&mut index, document_id, text)?;
        Ok(index)
    }

    /// Accumulate one text into `index`, merging with what is already
    /// there.
    ///
    /// Useful for batching several documents into one in-memory index
    /// before a single [`flush`](Self::flush). Each call must use a
    /// document id not already present in `index`.
    pub fn merge_into(&self, index: &mut InvertedIndex, document_id: u32, text: &str) -> Result<()> {
        let buf: Vec<char> = text.chars().collect();
        let mut transient = InvertedIndex::new();

        for gram in NgramSplit::new(&buf, self.config.n)? {
            // Index mode drops windows cut short by a separator or the
            // end of the buffer; query mode keeps them.
            if gram.len < self.config.n && document_id != 0 {
                continue;
            }
            let token = gram.text(&buf);
            transient.add_occurrence(
                self.tokens.as_ref(),
                document_id,
                token.as_bytes(),
                gram.start as u32,
            )?;
        }

        index.merge(transient);
        Ok(())
    }

    /// Index one document and flush its postings into the store.
    ///
    /// Indexing the same document id twice is undefined; delete-and-readd
    /// semantics are out of scope.
    ///
    /// # Errors
    ///
    /// Analysis, token store, encode, and store failures abort the
    /// document; tokens not yet flushed keep their previous stored state.
    pub fn index_document(&self, document_id: u32, text: &str) -> Result<()> {
        if document_id == 0 {
            return Err(YariError::index("document id 0 is reserved for query mode"));
        }
        let mut index = self.build_index(document_id, text)?;
        self.flush(&mut index)
    }

    /// Flush every accumulated entry through the persistence bridge,
    /// leaving `index` empty.
    pub fn flush(&self, index: &mut InvertedIndex) -> Result<()> {
        for entry in index.drain() {
            self.updater.update(entry)?;
        }
        Ok(())
    }
}
