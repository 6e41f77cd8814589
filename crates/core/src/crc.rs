//! Polynomial CRC over bitstrings.
//!
//! The generator polynomial is written MSB first: `"1011"` is
//! x^3 + x + 1. A generator of `k + 1` bits has degree `k` and yields a
//! `k`-bit remainder.
//!
//! # Division
//!
//! ```text
//! message 1101, generator 1011, k = 3
//!
//! 1101000    message with k zeros appended
//! 1011       leading bit 1: XOR the generator in
//! 0110000
//!  1011
//! 0011100
//!   1011
//! 0001010
//!    1011
//! 0000001    remainder = last k bits = 001
//! ```
//!
//! Only the first `len(message)` positions are scanned; the result is the
//! final `k` bits of the working buffer.
//!
//! # Detection Limits
//!
//! With a generator whose last bit is `1`, every single-bit error and every
//! burst of at most `k` bits is caught. Error patterns that are themselves
//! multiples of the generator are not: for `"1011"` that includes the
//! generator pattern itself and any two flips exactly seven positions apart.

use crate::bitstring::BitString;
use crate::error::{Error, Result};

/// Generator used when the caller does not pick one (x^3 + x + 1).
pub const DEFAULT_POLYNOMIAL: &str = "1011";

/// The default generator as a bitstring.
pub fn default_polynomial() -> BitString {
    BitString::new(vec![true, false, true, true])
}

/// Check that `polynomial` is a usable generator and return its degree.
///
/// # Errors
/// Returns `Error::InvalidPolynomial` if it is empty or starts with `0`.
pub fn degree(polynomial: &BitString) -> Result<usize> {
    match polynomial.get(0) {
        Some(true) => Ok(polynomial.len() - 1),
        Some(false) => Err(Error::InvalidPolynomial(format!(
            "{} has a leading zero",
            polynomial
        ))),
        None => Err(Error::InvalidPolynomial("empty polynomial".to_string())),
    }
}

/// Remainder of `message * x^k` divided by `polynomial`, as `k` bits.
///
/// # Errors
/// Returns `Error::InvalidPolynomial` if the generator is malformed.
pub fn remainder(message: &BitString, polynomial: &BitString) -> Result<BitString> {
    let k = degree(polynomial)?;
    let generator = polynomial.as_slice();

    let mut buffer = message.as_slice().to_vec();
    buffer.resize(message.len() + k, false);

    for i in 0..message.len() {
        if !buffer[i] {
            continue;
        }
        for (j, &g) in generator.iter().enumerate() {
            buffer[i + j] ^= g;
        }
    }

    Ok(BitString::new(buffer.split_off(message.len())))
}

/// Append the CRC remainder to `data`.
///
/// # Errors
/// Returns `Error::InvalidPolynomial` if the generator is malformed.
pub fn encode(data: &BitString, polynomial: &BitString) -> Result<BitString> {
    let crc = remainder(data, polynomial)?;
    Ok(data.concat(&crc))
}

/// True iff `encoded` leaves a zero remainder.
///
/// # Errors
/// Returns `Error::InvalidPolynomial` if the generator is malformed.
pub fn verify(encoded: &BitString, polynomial: &BitString) -> Result<bool> {
    Ok(remainder(encoded, polynomial)?.is_all_zeros())
}

/// Indices of the trailing check bits in a codeword of `encoded_len` bits.
///
/// # Errors
/// Returns `Error::InvalidPolynomial` if the generator is malformed.
pub fn check_positions(encoded_len: usize, polynomial: &BitString) -> Result<Vec<usize>> {
    let k = degree(polynomial)?;
    Ok((encoded_len.saturating_sub(k)..encoded_len).collect())
}
