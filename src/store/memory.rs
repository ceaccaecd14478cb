//! In-memory token and postings store for testing and ephemeral indexes.

use std::sync::Mutex;

use ahash::AHashMap;

use crate::error::Result;
use crate::index::inverted::TokenId;
use crate::store::traits::{PostingsStore, TokenStore};

/// An in-memory implementation of both store traits.
///
/// Token ids are assigned monotonically starting at 1; id 0 stays
/// reserved for "none". Posting blobs are replaced wholesale on `put`.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    token_ids: AHashMap<Vec<u8>, TokenId>,
    postings: AHashMap<TokenId, (u32, Box<[u8]>)>,
    document_count: u32,
}

impl MemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        MemoryDirectory {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Register a new document and return its id.
    ///
    /// Document ids are assigned monotonically starting at 1, leaving 0
    /// free as the query-mode sentinel.
    pub fn add_document(&self) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        inner.document_count += 1;
        inner.document_count
    }

    /// Number of distinct tokens seen so far.
    pub fn token_count(&self) -> usize {
        self.inner.lock().unwrap().token_ids.len()
    }

    /// Clear all tokens, blobs, and the document counter.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.token_ids.clear();
        inner.postings.clear();
        inner.document_count = 0;
    }
}

impl TokenStore for MemoryDirectory {
    fn token_id(&self, token: &[u8], document_id: u32) -> Result<(TokenId, u32)> {
        let mut inner = self.inner.lock().unwrap();

        let token_id = match inner.token_ids.get(token).copied() {
            Some(id) => id,
            None if document_id == 0 => return Ok((0, 0)),
            None => {
                let id = inner.token_ids.len() as TokenId + 1;
                inner.token_ids.insert(token.to_vec(), id);
                id
            }
        };

        let docs_count = inner
            .postings
            .get(&token_id)
            .map(|&(docs_count, _)| docs_count)
            .unwrap_or(0);
        Ok((token_id, docs_count))
    }
}

impl PostingsStore for MemoryDirectory {
    fn get(&self, token_id: TokenId) -> Result<Option<(u32, Vec<u8>)>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .postings
            .get(&token_id)
            .map(|(docs_count, blob)| (*docs_count, blob.to_vec())))
    }

    fn put(&self, token_id: TokenId, docs_count: u32, postings: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .postings
            .insert(token_id, (docs_count, postings.into()));
        Ok(())
    }

    fn document_count(&self) -> Result<u32> {
        Ok(self.inner.lock().unwrap().document_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ids_are_monotonic() {
        let directory = MemoryDirectory::new();

        let (first, _) = directory.token_id(b"ab", 1).unwrap();
        let (second, _) = directory.token_id(b"cd", 1).unwrap();
        let (again, _) = directory.token_id(b"ab", 1).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(again, first);
        assert_eq!(directory.token_count(), 2);
    }

    #[test]
    fn test_lookup_only_does_not_assign() {
        let directory = MemoryDirectory::new();

        let (id, docs_count) = directory.token_id(b"ab", 0).unwrap();
        assert_eq!(id, 0);
        assert_eq!(docs_count, 0);
        assert_eq!(directory.token_count(), 0);

        // A later indexing call still hands out the first real id.
        let (id, _) = directory.token_id(b"ab", 1).unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_docs_count_follows_postings() {
        let directory = MemoryDirectory::new();

        let (id, docs_count) = directory.token_id(b"ab", 1).unwrap();
        assert_eq!(docs_count, 0);

        directory.put(id, 2, &[1, 2, 3]).unwrap();
        let (_, docs_count) = directory.token_id(b"ab", 1).unwrap();
        assert_eq!(docs_count, 2);
    }

    #[test]
    fn test_put_replaces_blob() {
        let directory = MemoryDirectory::new();

        directory.put(1, 1, &[1]).unwrap();
        directory.put(1, 2, &[2, 3]).unwrap();

        let (docs_count, blob) = directory.get(1).unwrap().unwrap();
        assert_eq!(docs_count, 2);
        assert_eq!(blob, vec![2, 3]);
    }

    #[test]
    fn test_document_counter() {
        let directory = MemoryDirectory::new();
        assert_eq!(directory.document_count().unwrap(), 0);
        assert_eq!(directory.add_document(), 1);
        assert_eq!(directory.add_document(), 2);
        assert_eq!(directory.document_count().unwrap(), 2);

        directory.clear();
        assert_eq!(directory.document_count().unwrap(), 0);
    }
}
