//! Hamming(7,4) single-error-correcting code.
//!
//! # Codeword Layout
//!
//! ```text
//! index:  0   1   2   3   4   5   6
//! bit:   p1  p2  d1  p3  d2  d3  d4
//! ```
//!
//! Parity coverage (XOR over data bits, 1-indexed):
//! - p1 = d1 ^ d2 ^ d4
//! - p2 = d1 ^ d3 ^ d4
//! - p3 = d2 ^ d3 ^ d4
//!
//! # Decoding
//!
//! The decoder recomputes each check including the received parity bit,
//! giving syndrome `s1 + 2*s2 + 4*s3`. A non-zero syndrome names the
//! 1-indexed position to flip. Syndrome 7 therefore lands on index 6 (d4).
//!
//! Two or more flips are outside the code's guarantee: the syndrome may point
//! at a bit that was never corrupted, and the decoder will "correct" it and
//! return wrong data while still reporting a correction.

use crate::bitstring::BitString;
use crate::error::{Error, Result};

/// Number of data bits per codeword
pub const DATA_BITS: usize = 4;

/// Number of bits in a codeword
pub const CODEWORD_BITS: usize = 7;

/// Codeword indices carrying check bits (p1, p2, p3)
pub const PARITY_POSITIONS: [usize; 3] = [0, 1, 3];

/// Codeword indices carrying data bits (d1, d2, d3, d4)
pub const DATA_POSITIONS: [usize; 4] = [2, 4, 5, 6];

/// Result of decoding one codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// The 4 data bits after any correction
    pub data: BitString,

    /// True whenever the syndrome was non-zero
    pub corrected: bool,

    /// Index (0..7) of the bit that was flipped, if any
    pub error_position: Option<usize>,
}

/// Encode exactly 4 data bits into a 7-bit codeword.
///
/// # Errors
/// Returns `Error::InvalidLength` unless `data` has 4 bits.
pub fn encode(data: &BitString) -> Result<BitString> {
    if data.len() != DATA_BITS {
        return Err(Error::InvalidLength {
            expected: DATA_BITS,
            actual: data.len(),
        });
    }

    let (d1, d2, d3, d4) = (data[0], data[1], data[2], data[3]);

    let p1 = d1 ^ d2 ^ d4;
    let p2 = d1 ^ d3 ^ d4;
    let p3 = d2 ^ d3 ^ d4;

    Ok(BitString::new(vec![p1, p2, d1, p3, d2, d3, d4]))
}

/// Decode a 7-bit codeword, correcting at most one flipped bit.
///
/// # Errors
/// Returns `Error::InvalidLength` unless `encoded` has 7 bits.
pub fn decode(encoded: &BitString) -> Result<DecodeResult> {
    let syndrome = syndrome(encoded)?;

    let mut working = encoded.clone();
    let error_position = if syndrome == 0 {
        None
    } else {
        let position = syndrome - 1;
        working.toggle(position);
        Some(position)
    };

    Ok(DecodeResult {
        data: extract_data(&working)?,
        corrected: error_position.is_some(),
        error_position,
    })
}

/// Compute the 3-bit syndrome (0..=7) of a codeword.
///
/// # Errors
/// Returns `Error::InvalidLength` unless `encoded` has 7 bits.
pub fn syndrome(encoded: &BitString) -> Result<usize> {
    check_codeword_len(encoded)?;

    let b = encoded.as_slice();
    let (p1, p2, d1, p3, d2, d3, d4) = (b[0], b[1], b[2], b[3], b[4], b[5], b[6]);

    let s1 = p1 ^ d1 ^ d2 ^ d4;
    let s2 = p2 ^ d1 ^ d3 ^ d4;
    let s3 = p3 ^ d2 ^ d3 ^ d4;

    Ok(s1 as usize + 2 * s2 as usize + 4 * s3 as usize)
}

/// Read the data positions of a codeword without correcting anything.
///
/// # Errors
/// Returns `Error::InvalidLength` unless `encoded` has 7 bits.
pub fn extract_data(encoded: &BitString) -> Result<BitString> {
    check_codeword_len(encoded)?;
    encoded.select(&DATA_POSITIONS)
}

fn check_codeword_len(encoded: &BitString) -> Result<()> {
    if encoded.len() != CODEWORD_BITS {
        return Err(Error::InvalidLength {
            expected: CODEWORD_BITS,
            actual: encoded.len(),
        });
    }
    Ok(())
}
