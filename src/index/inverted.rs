//! In-memory inverted index accumulation.
//!
//! A transient [`InvertedIndex`] is built per document (or per query),
//! merged into a larger in-memory index if the caller is batching, and
//! finally drained into the persistent store. It never outlives the
//! document-processing scope that created it.

use ahash::AHashMap;
use std::collections::hash_map::Entry;

use crate::error::Result;
use crate::index::posting::{Posting, PostingList};
use crate::store::traits::TokenStore;

/// Identifier assigned to a token by the token store; 0 means "none".
pub type TokenId = u32;

/// One token's accumulated postings plus its corpus-wide counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingsEntry {
    /// The token this entry belongs to.
    pub token_id: TokenId,

    /// Number of documents carrying the token.
    ///
    /// While accumulating a single document this is 1; after merging with
    /// a fetched persistent list it covers the whole corpus.
    pub docs_count: u32,

    /// Total number of occurrences across all postings.
    pub positions_count: u32,

    /// The postings themselves, ascending by document id.
    pub postings: PostingList,
}

/// An in-memory inverted index keyed by token id.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    entries: AHashMap<TokenId, PostingsEntry>,
}

impl InvertedIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        InvertedIndex {
            entries: AHashMap::new(),
        }
    }

    /// Number of distinct tokens in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for a token id.
    pub fn get(&self, token_id: TokenId) -> Option<&PostingsEntry> {
        self.entries.get(&token_id)
    }

    /// Iterate over the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PostingsEntry> {
        self.entries.values()
    }

    /// Record one occurrence of `token` at `position` in `document_id`.
    ///
    /// The token is interned through `tokens`. A fresh entry starts with
    /// `docs_count` 1 when a real document is being indexed; in query mode
    /// (`document_id` 0) it starts with the corpus-wide count the token
    /// store reports, which query evaluation uses for ranking.
    ///
    /// # Errors
    ///
    /// Token store failures propagate to the caller.
    pub fn add_occurrence(
        &mut self,
        tokens: &dyn TokenStore,
        document_id: u32,
        token: &[u8],
        position: u32,
    ) -> Result<()> {
        let (token_id, token_docs_count) = tokens.token_id(token, document_id)?;

        match self.entries.entry(token_id) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                // Single-document accumulation touches only the posting
                // appended when the entry was created.
                if let Some(posting) = entry.postings.last_mut() {
                    posting.push_position(position);
                    entry.positions_count += 1;
                }
            }
            Entry::Vacant(vacant) => {
                let docs_count = if document_id != 0 { 1 } else { token_docs_count };
                let mut postings = PostingList::new();
                postings.push(Posting::new(document_id, position));
                vacant.insert(PostingsEntry {
                    token_id,
                    docs_count,
                    positions_count: 1,
                    postings,
                });
            }
        }

        Ok(())
    }

    /// Merge `other` into this index, consuming it.
    ///
    /// Entries missing from `self` move over wholesale; entries present on
    /// both sides merge their posting lists and sum their counters. The
    /// doc-id domains of a shared token must be disjoint.
    pub fn merge(&mut self, other: InvertedIndex) {
        for (token_id, entry) in other.entries {
            match self.entries.entry(token_id) {
                Entry::Occupied(mut occupied) => {
                    let base = occupied.get_mut();
                    let postings = std::mem::take(&mut base.postings);
                    base.postings = PostingList::merge(postings, entry.postings);
                    base.docs_count += entry.docs_count;
                    base.positions_count += entry.positions_count;
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(entry);
                }
            }
        }
    }

    /// Drain all entries out of the index, leaving it empty.
    pub fn drain(&mut self) -> impl Iterator<Item = PostingsEntry> + '_ {
        self.entries.drain().map(|(_, entry)| entry)
    }
}
