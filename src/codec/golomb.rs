//! Golomb coding for non-negative integers.
//!
//! A Golomb code with parameter `m` writes `n` as the unary code of
//! `n / m` followed by a truncated-binary code of `n % m`. With `m = 1`
//! it degenerates to pure unary. Small gaps between nearby document ids
//! or token positions encode in very few bits when `m` is tuned to the
//! expected gap size.

use crate::codec::bitstream::{BitReader, BitWriter};
use crate::error::{Result, YariError};

/// Golomb codec parameters for a fixed `m`.
///
/// The derived parameters satisfy `2^b - t = m` and `2^(b-1) <= m <= 2^b`,
/// with `b = 0` only when `m = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Golomb {
    m: u32,
    b: u32,
    t: u32,
}

impl Golomb {
    /// Derive the codec parameters for `m`.
    ///
    /// # Errors
    ///
    /// Returns a codec error if `m` is 0.
    pub fn new(m: u32) -> Result<Self> {
        if m == 0 {
            return Err(YariError::codec("golomb parameter m must be positive"));
        }
        // b is the smallest value with 2^b >= m.
        let mut b = 0u32;
        let mut pow = 1u64;
        while u64::from(m) > pow {
            b += 1;
            pow <<= 1;
        }
        let t = (pow - u64::from(m)) as u32;
        Ok(Golomb { m, b, t })
    }

    /// The tuning parameter `m`.
    pub fn m(&self) -> u32 {
        self.m
    }

    /// The code width `b = ceil(log2(m))`.
    pub fn b(&self) -> u32 {
        self.b
    }

    /// The truncation threshold `t = 2^b - m`.
    pub fn t(&self) -> u32 {
        self.t
    }

    /// Encode a single non-negative integer into `out`.
    pub fn encode(&self, n: u32, out: &mut BitWriter) {
        // Unary code of the quotient.
        for _ in 0..n / self.m {
            out.push_bit(true);
        }
        out.push_bit(false);

        // Truncated binary code of the remainder.
        if self.m > 1 {
            let r = n % self.m;
            if r < self.t {
                let mut mask = 1u32 << (self.b - 2);
                while mask != 0 {
                    out.push_bit(r & mask != 0);
                    mask >>= 1;
                }
            } else {
                let r = r + self.t;
                let mut mask = 1u32 << (self.b - 1);
                while mask != 0 {
                    out.push_bit(r & mask != 0);
                    mask >>= 1;
                }
            }
        }
    }

    /// Decode a single integer from `input`.
    ///
    /// # Errors
    ///
    /// Returns a codec error when the stream ends in the middle of a code,
    /// or when a corrupt stream encodes a value that does not fit in u32.
    pub fn decode(&self, input: &mut BitReader<'_>) -> Result<u32> {
        let mut n = 0u32;
        while input.read_bit()? {
            n = n
                .checked_add(self.m)
                .ok_or_else(|| YariError::codec("golomb code overflows u32"))?;
        }

        if self.m > 1 {
            let mut r = 0u32;
            for _ in 0..self.b - 1 {
                r = (r << 1) | u32::from(input.read_bit()?);
            }
            if r >= self.t {
                r = ((r << 1) | u32::from(input.read_bit()?)) - self.t;
            }
            n = n
                .checked_add(r)
                .ok_or_else(|| YariError::codec("golomb code overflows u32"))?;
        }

        Ok(n)
    }
}
