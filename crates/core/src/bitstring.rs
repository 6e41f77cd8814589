//! Fixed-length bitstrings shared by every codec.
//!
//! A `BitString` is an ordered sequence of binary digits indexed from 0.
//! Its length is chosen at construction and never changes; codecs build new
//! values rather than growing existing ones.
//!
//! # Text form
//! Bitstrings parse from and display as plain `0`/`1` text, MSB first in
//! reading order.
//!
//! # Example
//! ```
//! use ecc_sim_core::bitstring::BitString;
//!
//! let bits: BitString = "1011".parse().unwrap();
//! assert_eq!(bits.len(), 4);
//! assert_eq!(bits.count_ones(), 3);
//! assert_eq!(bits.to_string(), "1011");
//! ```

use crate::error::{Error, Result};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// An immutable-length sequence of bits.
///
/// # Invariants
/// - every element is exactly 0 or 1 (enforced by `bool` storage)
/// - `len()` is fixed once the value exists
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Wrap an existing bit vector.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// A bitstring of `len` zero bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// True if every bit is `0` (vacuously true when empty).
    pub fn is_all_zeros(&self) -> bool {
        self.bits.iter().all(|&bit| !bit)
    }

    /// Concatenate `other` after `self`.
    pub fn concat(&self, other: &BitString) -> BitString {
        let mut bits = Vec::with_capacity(self.len() + other.len());
        bits.extend_from_slice(&self.bits);
        bits.extend_from_slice(&other.bits);
        Self { bits }
    }

    /// The first `len` bits, or the whole string if it is shorter.
    pub fn prefix(&self, len: usize) -> BitString {
        let end = len.min(self.bits.len());
        Self {
            bits: self.bits[..end].to_vec(),
        }
    }

    /// Truncate to `len` bits, or right-pad with `0` up to `len`.
    pub fn resized(&self, len: usize) -> BitString {
        let mut bits = self.bits.clone();
        bits.resize(len, false);
        Self { bits }
    }

    /// Pick the bits at `positions`, in the order given.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if any position is out of range.
    pub fn select(&self, positions: &[usize]) -> Result<BitString> {
        let bits = positions
            .iter()
            .map(|&pos| self.get(pos).ok_or_else(|| out_of_range(pos, self.len())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }

    /// Return a copy with every bit in `positions` inverted.
    ///
    /// A position listed twice is flipped twice.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if any position is out of range.
    pub fn with_flipped(&self, positions: &[usize]) -> Result<BitString> {
        let mut copy = self.clone();
        for &pos in positions {
            if pos >= copy.len() {
                return Err(out_of_range(pos, copy.len()));
            }
            copy.toggle(pos);
        }
        Ok(copy)
    }

    /// Invert one bit in place. Caller guarantees `index < len()`.
    pub(crate) fn toggle(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }
}

fn out_of_range(position: usize, len: usize) -> Error {
    Error::InvalidParameter(format!(
        "bit position {} out of range for length {}",
        position, len
    ))
}

/// Generate `len` uniformly random bits.
///
/// Each bit is an independent fair coin drawn from `rng`, so a seeded
/// generator reproduces the same payloads.
pub fn generate<R: Rng + ?Sized>(len: usize, rng: &mut R) -> BitString {
    BitString {
        bits: (0..len).map(|_| rng.gen::<bool>()).collect(),
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(Error::InvalidBit { position, found }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl Index<usize> for BitString {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.bits[index]
    }
}

impl Serialize for BitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
