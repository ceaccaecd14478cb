//! Encoding and decoding of whole posting lists.
//!
//! Two blob formats share the same in-memory representation:
//!
//! - **Raw**: concatenated `(document_id, positions_count, positions...)`
//!   records of little-endian u32s. The blob carries no entry count; it
//!   ends when the input is consumed.
//! - **Golomb**: a `docs_count` header, a Golomb-coded gap stream of
//!   document ids, then one `(positions_count, m, gaps...)` section per
//!   posting. Each `m` parameter is embedded next to its stream, so the
//!   decoder needs no out-of-band tuning. Every bit section is padded to
//!   a byte boundary before the next integer section.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::codec::Compression;
use crate::codec::bitstream::{BitReader, BitWriter};
use crate::codec::golomb::Golomb;
use crate::error::{Result, YariError};
use crate::index::posting::{Posting, PostingList};

/// Encode a posting list into a blob using the given compression.
///
/// `total_documents` is the number of documents in the corpus and tunes
/// the document-id Golomb parameter; the raw format ignores it. Callers
/// must pass `total_documents >= postings.len()` for the tuning to be
/// meaningful.
pub fn encode_postings(
    compression: Compression,
    postings: &PostingList,
    total_documents: u32,
) -> Result<Vec<u8>> {
    match compression {
        Compression::None => encode_raw(postings),
        Compression::Golomb => encode_golomb(postings, total_documents),
    }
}

/// Decode a posting list from a blob using the given compression.
///
/// The compression must match the one used at encode time.
pub fn decode_postings(compression: Compression, bytes: &[u8]) -> Result<PostingList> {
    match compression {
        Compression::None => decode_raw(bytes),
        Compression::Golomb => decode_golomb(bytes),
    }
}

fn encode_raw(postings: &PostingList) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for posting in postings.iter() {
        buf.write_u32::<LittleEndian>(posting.document_id)?;
        buf.write_u32::<LittleEndian>(posting.positions_count())?;
        for &position in &posting.positions {
            buf.write_u32::<LittleEndian>(position)?;
        }
    }
    Ok(buf)
}

fn decode_raw(bytes: &[u8]) -> Result<PostingList> {
    let mut input = bytes;
    let mut postings = PostingList::new();
    while !input.is_empty() {
        let document_id = read_u32(&mut input)?;
        let positions_count = read_u32(&mut input)? as usize;
        // Positions are 4 bytes each; an inflated count from a corrupt
        // blob must fail here, not inside the allocator.
        if positions_count > input.len() / 4 {
            return Err(YariError::resource_exhausted(format!(
                "postings blob declares {positions_count} positions with {} bytes left",
                input.len()
            )));
        }
        let mut positions = Vec::with_capacity(positions_count);
        for _ in 0..positions_count {
            positions.push(read_u32(&mut input)?);
        }
        postings.push(Posting {
            document_id,
            positions,
        });
    }
    Ok(postings)
}

fn read_u32(input: &mut &[u8]) -> Result<u32> {
    input
        .read_u32::<LittleEndian>()
        .map_err(|_| YariError::codec("postings blob truncated"))
}

fn encode_golomb(postings: &PostingList, total_documents: u32) -> Result<Vec<u8>> {
    let mut out = BitWriter::new();
    out.write_u32(postings.len() as u32);

    if !postings.is_empty() {
        // Average gap between document ids tunes the codec; clamp so a
        // stale corpus count can never produce m = 0.
        let m = (total_documents / postings.len() as u32).max(1);
        out.write_u32(m);
        let golomb = Golomb::new(m)?;
        let mut prev = 0u32;
        for posting in postings.iter() {
            golomb.encode(posting.document_id - prev - 1, &mut out);
            prev = posting.document_id;
        }
        out.align();
    }

    for posting in postings.iter() {
        out.write_u32(posting.positions_count());
        if let Some(&last) = posting.positions.last() {
            let m = ((last + 1) / posting.positions_count()).max(1);
            out.write_u32(m);
            let golomb = Golomb::new(m)?;
            let mut prev: Option<u32> = None;
            for &position in &posting.positions {
                let gap = match prev {
                    Some(p) => position - p - 1,
                    None => position,
                };
                golomb.encode(gap, &mut out);
                prev = Some(position);
            }
            out.align();
        }
    }

    Ok(out.into_bytes())
}

fn decode_golomb(bytes: &[u8]) -> Result<PostingList> {
    let mut input = BitReader::new(bytes);
    let docs_count = input.read_u32()? as usize;
    // Every decoded posting consumes at least a 4-byte positions_count, so
    // a header claiming more documents than the remaining bytes can carry
    // is corrupt; reject it before sizing any buffer from it.
    if docs_count > input.remaining() / 4 {
        return Err(YariError::resource_exhausted(format!(
            "postings blob declares {docs_count} documents with {} bytes left",
            input.remaining()
        )));
    }

    let mut document_ids = Vec::with_capacity(docs_count);
    if docs_count > 0 {
        let golomb = Golomb::new(input.read_u32()?)?;
        let mut prev = 0u32;
        for _ in 0..docs_count {
            let gap = golomb.decode(&mut input)?;
            let document_id = prev
                .checked_add(gap)
                .and_then(|id| id.checked_add(1))
                .ok_or_else(|| YariError::codec("decoded document id overflows u32"))?;
            document_ids.push(document_id);
            prev = document_id;
        }
        input.align();
    }

    let mut postings = PostingList::with_capacity(docs_count);
    for document_id in document_ids {
        let positions_count = input.read_u32()? as usize;
        // Each position gap is at least one bit in the stream.
        if positions_count > input.remaining().saturating_mul(8) {
            return Err(YariError::resource_exhausted(format!(
                "postings blob declares {positions_count} positions with {} bytes left",
                input.remaining()
            )));
        }
        let mut positions = Vec::with_capacity(positions_count);
        if positions_count > 0 {
            let golomb = Golomb::new(input.read_u32()?)?;
            let mut prev: Option<u32> = None;
            for _ in 0..positions_count {
                let gap = golomb.decode(&mut input)?;
                let position = match prev {
                    Some(p) => p
                        .checked_add(gap)
                        .and_then(|pos| pos.checked_add(1))
                        .ok_or_else(|| YariError::codec("decoded position overflows u32"))?,
                    None => gap,
                };
                positions.push(position);
                prev = Some(position);
            }
            input.align();
        }
        postings.push(Posting {
            document_id,
            positions,
        });
    }

    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> PostingList {
        let mut postings = PostingList::new();
        postings.push(Posting {
            document_id: 1,
            positions: vec![0, 4],
        });
        postings.push(Posting {
            document_id: 3,
            positions: vec![7],
        });
        postings
    }

    #[test]
    fn test_raw_round_trip() {
        let postings = sample_list();
        let blob = encode_postings(Compression::None, &postings, 10).unwrap();
        // (1, 2, 0, 4) and (3, 1, 7): seven little-endian u32s.
        assert_eq!(blob.len(), 28);
        let decoded = decode_postings(Compression::None, &blob).unwrap();
        assert_eq!(decoded, postings);
    }

    #[test]
    fn test_raw_empty() {
        let blob = encode_postings(Compression::None, &PostingList::new(), 0).unwrap();
        assert!(blob.is_empty());
        assert!(decode_postings(Compression::None, &blob).unwrap().is_empty());
    }

    #[test]
    fn test_raw_truncated() {
        let postings = sample_list();
        let blob = encode_postings(Compression::None, &postings, 10).unwrap();
        assert!(decode_postings(Compression::None, &blob[..blob.len() - 2]).is_err());
        assert!(decode_postings(Compression::None, &blob[..6]).is_err());
    }

    #[test]
    fn test_golomb_layout() {
        // docs_count=2, total=10: m_doc = 5 (b=3, t=3), doc gaps [0, 1]
        // encode as "000" and "001" -> 0b0000_0100.
        // Positions of doc 1: count=2, m = (4+1)/2 = 2 (b=1, t=0), gaps
        // [0, 3] encode as "00" and "101" -> 0b0010_1000.
        // Positions of doc 3: count=1, m = (7+1)/1 = 8 (b=3, t=0), gap
        // [7] encodes as "0111" -> 0b0111_0000.
        let blob = encode_postings(Compression::Golomb, &sample_list(), 10).unwrap();

        let mut expected: Vec<u8> = Vec::new();
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(&5u32.to_le_bytes());
        expected.push(0b0000_0100);
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.push(0b0010_1000);
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&8u32.to_le_bytes());
        expected.push(0b0111_0000);
        assert_eq!(blob, expected);
    }

    #[test]
    fn test_golomb_round_trip() {
        let postings = sample_list();
        let blob = encode_postings(Compression::Golomb, &postings, 10).unwrap();
        let decoded = decode_postings(Compression::Golomb, &blob).unwrap();
        assert_eq!(decoded, postings);
    }

    #[test]
    fn test_golomb_round_trip_dense() {
        // Dense ids and sparse positions stress both gap streams.
        let mut postings = PostingList::new();
        for id in 1..=50 {
            postings.push(Posting {
                document_id: id,
                positions: vec![id * 7, id * 7 + 1, id * 100],
            });
        }
        let blob = encode_postings(Compression::Golomb, &postings, 50).unwrap();
        let decoded = decode_postings(Compression::Golomb, &blob).unwrap();
        assert_eq!(decoded, postings);
    }

    #[test]
    fn test_golomb_round_trip_total_larger_than_docs() {
        let postings = sample_list();
        for total in [2, 3, 10, 1000] {
            let blob = encode_postings(Compression::Golomb, &postings, total).unwrap();
            let decoded = decode_postings(Compression::Golomb, &blob).unwrap();
            assert_eq!(decoded, postings, "total={total}");
        }
    }

    #[test]
    fn test_golomb_empty() {
        let blob = encode_postings(Compression::Golomb, &PostingList::new(), 10).unwrap();
        assert_eq!(blob, 0u32.to_le_bytes());
        assert!(
            decode_postings(Compression::Golomb, &blob)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_golomb_truncated_mid_unary() {
        // Header claims one document, m=1, and the body is all one-bits
        // with no terminating zero.
        let mut blob = Vec::new();
        blob.extend_from_slice(&1u32.to_le_bytes());
        blob.extend_from_slice(&1u32.to_le_bytes());
        blob.push(0xFF);
        assert!(decode_postings(Compression::Golomb, &blob).is_err());
    }

    #[test]
    fn test_golomb_truncated_positions() {
        let postings = sample_list();
        let blob = encode_postings(Compression::Golomb, &postings, 10).unwrap();
        // Cut inside the positions sections.
        assert!(decode_postings(Compression::Golomb, &blob[..blob.len() - 6]).is_err());
    }

    #[test]
    fn test_raw_inflated_positions_count() {
        // A 4-byte header can demand a gigantic allocation; the count must
        // be rejected against the bytes that actually remain, not handed
        // to the allocator.
        let mut blob = Vec::new();
        blob.extend_from_slice(&1u32.to_le_bytes());
        blob.extend_from_slice(&0xFFFF_FFFEu32.to_le_bytes());
        let err = decode_postings(Compression::None, &blob).unwrap_err();
        assert!(err.to_string().contains("Resource exhausted"));
    }

    #[test]
    fn test_golomb_inflated_docs_count() {
        let blob = 0xFFFF_FFFEu32.to_le_bytes();
        let err = decode_postings(Compression::Golomb, &blob).unwrap_err();
        assert!(err.to_string().contains("Resource exhausted"));
    }

    #[test]
    fn test_golomb_inflated_positions_count() {
        // A valid single-document section followed by a positions count
        // far beyond what the remaining bits could encode.
        let mut blob = Vec::new();
        blob.extend_from_slice(&1u32.to_le_bytes()); // docs_count
        blob.extend_from_slice(&1u32.to_le_bytes()); // m_doc
        blob.push(0x00); // doc gap 0
        blob.extend_from_slice(&0xFFFF_FFFEu32.to_le_bytes()); // positions_count
        blob.extend_from_slice(&1u32.to_le_bytes()); // m_pos
        blob.push(0x00);
        let err = decode_postings(Compression::Golomb, &blob).unwrap_err();
        assert!(err.to_string().contains("Resource exhausted"));
    }

    #[test]
    fn test_golomb_document_id_overflow_fails() {
        // With m = 2^31, two gaps of 0x7FFF_FFFF reconstruct a second
        // document id past u32::MAX; the decoder must report corruption
        // rather than wrap.
        let mut blob = Vec::new();
        blob.extend_from_slice(&2u32.to_le_bytes());
        blob.extend_from_slice(&0x8000_0000u32.to_le_bytes());
        blob.extend_from_slice(&[0x7F, 0xFF, 0xFF, 0xFF, 0x7F, 0xFF, 0xFF, 0xFF]);
        let err = decode_postings(Compression::Golomb, &blob).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_golomb_single_posting_single_position() {
        let mut postings = PostingList::new();
        postings.push(Posting {
            document_id: 42,
            positions: vec![0],
        });
        let blob = encode_postings(Compression::Golomb, &postings, 100).unwrap();
        let decoded = decode_postings(Compression::Golomb, &blob).unwrap();
        assert_eq!(decoded, postings);
    }
}
