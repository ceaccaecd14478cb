//! Bridge between the in-memory accumulator and the persistent store.
//!
//! Persistent posting lists exist only as encoded blobs keyed by token
//! id. Updating a token fetches the old blob, merges the accumulated
//! postings into it, re-encodes, and replaces the blob in one store call.

use std::sync::Arc;

use crate::codec::{Compression, decode_postings, encode_postings};
use crate::error::{Result, YariError};
use crate::index::inverted::{PostingsEntry, TokenId};
use crate::index::posting::PostingList;
use crate::store::traits::PostingsStore;

/// Fetches, merges, and stores encoded posting blobs.
#[derive(Debug, Clone)]
pub struct PostingsUpdater {
    store: Arc<dyn PostingsStore>,
    compression: Compression,
}

impl PostingsUpdater {
    /// Create a new updater over `store`.
    ///
    /// `compression` must match the mode every blob in the store was
    /// written with.
    pub fn new(store: Arc<dyn PostingsStore>, compression: Compression) -> Self {
        PostingsUpdater { store, compression }
    }

    /// The compression mode this updater encodes and decodes with.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Fetch and decode the posting list stored for `token_id`.
    ///
    /// A missing or empty blob yields an empty list. Returns the decoded
    /// list together with its length.
    ///
    /// # Errors
    ///
    /// Store failures propagate; a blob that decodes to a different number
    /// of postings than the stored `docs_count` is reported as a codec
    /// error.
    pub fn fetch(&self, token_id: TokenId) -> Result<(PostingList, u32)> {
        let Some((docs_count, blob)) = self.store.get(token_id)? else {
            return Ok((PostingList::new(), 0));
        };
        if blob.is_empty() {
            return Ok((PostingList::new(), 0));
        }

        let postings = decode_postings(self.compression, &blob)?;
        let decoded_len = postings.len() as u32;
        if docs_count != decoded_len {
            return Err(YariError::codec(format!(
                "postings list decode error: stored:{docs_count} decoded:{decoded_len}"
            )));
        }
        Ok((postings, decoded_len))
    }

    /// Merge `entry` into the stored posting list for its token.
    ///
    /// A failed fetch is logged and leaves the store untouched without
    /// raising; the caller moves on to the next token. Encode and store
    /// failures propagate and abort the current document.
    ///
    /// The blob replacement is atomic per token: either the merged list is
    /// stored in full or the old blob stays.
    pub fn update(&self, mut entry: PostingsEntry) -> Result<()> {
        let (old_postings, old_len) = match self.fetch(entry.token_id) {
            Ok(fetched) => fetched,
            Err(e) => {
                log::error!(
                    "cannot fetch old postings list of token {} for update: {e}",
                    entry.token_id
                );
                return Ok(());
            }
        };

        if old_len > 0 {
            let postings = std::mem::take(&mut entry.postings);
            entry.postings = PostingList::merge(old_postings, postings);
            entry.docs_count += old_len;
        }

        let total_documents = self.store.document_count()?;
        let blob = encode_postings(self.compression, &entry.postings, total_documents)?;
        self.store.put(entry.token_id, entry.docs_count, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::posting::Posting;
    use crate::store::memory::MemoryDirectory;

    fn entry(token_id: TokenId, postings: &[(u32, &[u32])]) -> PostingsEntry {
        let mut list = PostingList::new();
        for &(document_id, positions) in postings {
            list.push(Posting {
                document_id,
                positions: positions.to_vec(),
            });
        }
        PostingsEntry {
            token_id,
            docs_count: list.len() as u32,
            positions_count: list.positions_count(),
            postings: list,
        }
    }

    fn updater(compression: Compression) -> (Arc<MemoryDirectory>, PostingsUpdater) {
        let directory = Arc::new(MemoryDirectory::new());
        let updater = PostingsUpdater::new(directory.clone(), compression);
        (directory, updater)
    }

    #[test]
    fn test_fetch_missing_token() {
        let (_, updater) = updater(Compression::None);
        let (postings, docs_count) = updater.fetch(42).unwrap();
        assert!(postings.is_empty());
        assert_eq!(docs_count, 0);
    }

    #[test]
    fn test_update_then_fetch() {
        for compression in [Compression::None, Compression::Golomb] {
            let (directory, updater) = updater(compression);
            directory.add_document();

            updater.update(entry(1, &[(1, &[0, 4])])).unwrap();

            let (postings, docs_count) = updater.fetch(1).unwrap();
            assert_eq!(docs_count, 1);
            assert_eq!(postings.as_slice()[0].positions, vec![0, 4]);
        }
    }

    #[test]
    fn test_update_merges_with_stored_list() {
        for compression in [Compression::None, Compression::Golomb] {
            let (directory, updater) = updater(compression);
            for _ in 0..5 {
                directory.add_document();
            }

            updater.update(entry(1, &[(1, &[0]), (5, &[2])])).unwrap();
            updater.update(entry(1, &[(3, &[1])])).unwrap();

            let (postings, docs_count) = updater.fetch(1).unwrap();
            assert_eq!(docs_count, 3);
            let ids: Vec<u32> = postings.iter().map(|p| p.document_id).collect();
            assert_eq!(ids, vec![1, 3, 5]);
        }
    }

    #[test]
    fn test_fetch_docs_count_mismatch() {
        let (directory, updater) = updater(Compression::Golomb);
        directory.add_document();

        updater.update(entry(1, &[(1, &[0]), (2, &[1])])).unwrap();

        // Rewrite the stored docs_count without touching the blob.
        let (_, blob) = directory.get(1).unwrap().unwrap();
        directory.put(1, 3, &blob).unwrap();

        let err = updater.fetch(1).unwrap_err();
        assert!(err.to_string().contains("postings list decode error"));
    }

    #[test]
    fn test_update_skips_on_fetch_failure() {
        let (directory, updater) = updater(Compression::Golomb);
        directory.add_document();

        // A blob that cannot be decoded makes the fetch fail; the update
        // must leave the stored bytes alone and report success.
        directory.put(1, 1, &[0xFF]).unwrap();
        updater.update(entry(1, &[(1, &[0])])).unwrap();

        let (docs_count, blob) = directory.get(1).unwrap().unwrap();
        assert_eq!(docs_count, 1);
        assert_eq!(blob, vec![0xFF]);
    }
}
