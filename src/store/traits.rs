//! Traits for the external token and postings collaborators.

use crate::error::Result;
use crate::index::inverted::TokenId;

/// Interns token bytes into monotonically assigned 32-bit ids.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Look up the id for `token`, assigning a fresh one if unseen.
    ///
    /// Returns the id together with the number of documents currently
    /// carrying the token. `document_id` 0 selects lookup-only mode: no id
    /// is assigned and an unseen token comes back as id 0 ("none") with a
    /// count of 0.
    fn token_id(&self, token: &[u8], document_id: u32) -> Result<(TokenId, u32)>;
}

/// Keeps encoded posting blobs keyed by token id.
pub trait PostingsStore: Send + Sync + std::fmt::Debug {
    /// Fetch the stored `(docs_count, blob)` pair for a token, if any.
    fn get(&self, token_id: TokenId) -> Result<Option<(u32, Vec<u8>)>>;

    /// Replace the stored blob for a token.
    ///
    /// The replacement is atomic: a reader never observes a partial blob.
    fn put(&self, token_id: TokenId, docs_count: u32, postings: &[u8]) -> Result<()>;

    /// Total number of indexed documents in the corpus.
    fn document_count(&self) -> Result<u32>;
}
