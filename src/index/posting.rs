//! Posting and posting-list types.

/// One document's contribution to a token's index entry.
///
/// `positions` holds the code-point positions at which the token occurs in
/// the document, strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Identifier of the document; 0 is the query-mode sentinel and never
    /// reaches the persistent store.
    pub document_id: u32,

    /// Occurrence positions, strictly ascending.
    pub positions: Vec<u32>,
}

impl Posting {
    /// Create a posting with a single occurrence.
    pub fn new(document_id: u32, position: u32) -> Self {
        Posting {
            document_id,
            positions: vec![position],
        }
    }

    /// Number of occurrences recorded in this posting.
    pub fn positions_count(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Append an occurrence position.
    ///
    /// Positions must be appended in ascending order.
    pub fn push_position(&mut self, position: u32) {
        debug_assert!(
            self.positions.last().is_none_or(|&last| last < position),
            "positions must be strictly ascending"
        );
        self.positions.push(position);
    }
}

/// An ordered sequence of postings, strictly ascending by document id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Create a new empty posting list with room for `capacity` postings.
    pub fn with_capacity(capacity: usize) -> Self {
        PostingList {
            postings: Vec::with_capacity(capacity),
        }
    }

    /// Append a posting.
    ///
    /// Postings must be appended in ascending document-id order.
    pub fn push(&mut self, posting: Posting) {
        debug_assert!(
            self.postings
                .last()
                .is_none_or(|last| last.document_id < posting.document_id),
            "document ids must be strictly ascending"
        );
        self.postings.push(posting);
    }

    /// Number of postings (documents) in the list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the list holds no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of occurrences across all postings.
    pub fn positions_count(&self) -> u32 {
        self.postings.iter().map(|p| p.positions_count()).sum()
    }

    /// Iterate over the postings in document-id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Borrow the postings as a slice.
    pub fn as_slice(&self) -> &[Posting] {
        &self.postings
    }

    /// Mutable access to the most recently appended posting.
    pub fn last_mut(&mut self) -> Option<&mut Posting> {
        self.postings.last_mut()
    }

    /// Merge two lists ordered by ascending document id into one.
    ///
    /// Both inputs must already be sorted. The doc-id domains are expected
    /// to be disjoint; when they nonetheless overlap, `a`-side postings
    /// come first and the result is no longer strictly ascending.
    pub fn merge(a: PostingList, b: PostingList) -> PostingList {
        let mut merged = Vec::with_capacity(a.postings.len() + b.postings.len());
        let mut a_iter = a.postings.into_iter().peekable();
        let mut b_iter = b.postings.into_iter().peekable();

        loop {
            let take_a = match (a_iter.peek(), b_iter.peek()) {
                (Some(x), Some(y)) => {
                    debug_assert_ne!(
                        x.document_id, y.document_id,
                        "merged posting lists must not share document ids"
                    );
                    x.document_id <= y.document_id
                }
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_a { a_iter.next() } else { b_iter.next() };
            if let Some(posting) = next {
                merged.push(posting);
            }
        }

        PostingList { postings: merged }
    }
}

impl IntoIterator for PostingList {
    type Item = Posting;
    type IntoIter = std::vec::IntoIter<Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.into_iter()
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}
