//! Posting-list codecs.
//!
//! Posting lists are persisted as compact byte blobs in one of two formats
//! selected by [`Compression`]: a raw stream of little-endian integers, or
//! a Golomb-coded gap stream. The flag is chosen at startup and must stay
//! stable for the lifetime of a database; the same flag is required for
//! encode and decode.
//!
//! All fixed-width integer sections are little-endian regardless of host
//! byte order.

pub mod bitstream;
pub mod golomb;
pub mod postings;

use serde::{Deserialize, Serialize};

pub use bitstream::{BitReader, BitWriter};
pub use golomb::Golomb;
pub use postings::{decode_postings, encode_postings};

/// Compression applied to encoded posting lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw little-endian integer stream.
    #[default]
    None,
    /// Golomb-coded gap sequences.
    Golomb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_default() {
        assert_eq!(Compression::default(), Compression::None);
    }

    #[test]
    fn test_compression_serde() {
        assert_eq!(
            serde_json::to_string(&Compression::Golomb).unwrap(),
            "\"golomb\""
        );
        let mode: Compression = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(mode, Compression::None);
    }
}
