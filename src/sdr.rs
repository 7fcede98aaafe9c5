//! Sdr - Fixed-length binary vector handed from encoders to the learning engine.
//!
//! A Sparse Distributed Representation is stored as a `BitVec<u32, Lsb0>` so
//! that overlap counting works word-at-a-time with hardware popcount.
//!
//! # Examples
//!
//! ```
//! use chat_htm::Sdr;
//!
//! let mut sdr = Sdr::new(32);
//! sdr.set_range(4, 3);
//!
//! assert_eq!(sdr.num_bits(), 32);
//! assert_eq!(sdr.num_set(), 3);
//! assert_eq!(sdr.get_acts(), vec![4, 5, 6]);
//! ```

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed-length binary vector with a small number of active bits.
///
/// The length is chosen at construction and never changes; every encoder
/// produces SDRs of one length, which must equal the engine's input size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sdr {
    /// Underlying bitvec storage with u32 words, LSB0 ordering
    bits: BitVec<u32, Lsb0>,
}

impl Sdr {
    /// Create a new Sdr with `n` bits, all cleared.
    #[inline]
    pub fn new(n: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, n),
        }
    }

    /// Build an Sdr of length `n` with the given active indices.
    ///
    /// Indices >= n are silently ignored.
    pub fn from_acts(n: usize, idxs: &[usize]) -> Self {
        let mut sdr = Self::new(n);
        for &idx in idxs {
            if idx < n {
                sdr.bits.set(idx, true);
            }
        }
        sdr
    }

    /// Get total number of bits.
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    /// Set range of bits [beg, beg+len) to 1.
    pub fn set_range(&mut self, beg: usize, len: usize) {
        debug_assert!(beg + len <= self.bits.len());
        self.bits[beg..beg + len].fill(true);
    }

    /// Get indices of all set bits, in ascending order.
    pub fn get_acts(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Get indices of set bits inside [beg, beg+len), relative to `beg`.
    pub fn acts_in_range(&self, beg: usize, len: usize) -> Vec<usize> {
        debug_assert!(beg + len <= self.bits.len());
        self.bits[beg..beg + len].iter_ones().collect()
    }

    /// Count number of set bits (population count).
    #[inline]
    pub fn num_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Count bits that are 1 in both SDRs.
    ///
    /// Walks the active bits of `self` only, which is cheap for sparse SDRs.
    ///
    /// # Panics
    ///
    /// Panics if the two SDRs differ in length.
    pub fn num_similar(&self, other: &Sdr) -> usize {
        assert_eq!(
            self.bits.len(),
            other.bits.len(),
            "Sdr must have same length"
        );

        self.bits.iter_ones().filter(|&i| other.bits[i]).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_creation() {
        let sdr = Sdr::new(400);
        assert_eq!(sdr.num_bits(), 400);
        assert_eq!(sdr.num_set(), 0);
    }

    #[test]
    fn test_set_range() {
        let mut sdr = Sdr::new(100);
        sdr.set_range(95, 5);
        assert_eq!(sdr.get_acts(), vec![95, 96, 97, 98, 99]);
    }

    #[test]
    fn test_from_acts_ignores_out_of_range() {
        let sdr = Sdr::from_acts(8, &[1, 7, 8, 100]);
        assert_eq!(sdr.get_acts(), vec![1, 7]);
    }

    #[test]
    fn test_num_similar_across_words() {
        let a = Sdr::from_acts(70, &[0, 31, 32, 33, 64, 69]);
        let b = Sdr::from_acts(70, &[31, 33, 69]);
        assert_eq!(a.num_similar(&b), 3);
    }

    #[test]
    fn test_acts_in_range() {
        let sdr = Sdr::from_acts(20, &[2, 11, 12, 19]);
        assert_eq!(sdr.acts_in_range(10, 10), vec![1, 2, 9]);
    }
}
