//! Error types for the ecc-sim engine.
//!
//! Every engine operation is a pure computation over finite input, so all
//! failures are caller errors reported synchronously. Nothing here is fatal
//! and nothing is retried.

use thiserror::Error;

/// Top-level error type for all engine operations.
///
/// Each variant corresponds to a specific kind of bad input:
/// - Length: a fixed-size codec was handed the wrong number of bits
/// - Polynomial: a CRC generator without a leading `1`
/// - Parameter: a flip probability outside `[0, 1]` or an empty run
/// - Bit: text that is not made of `0` and `1`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Hamming(7,4) encode/decode given a wrongly sized input
    #[error("invalid length: expected {expected} bits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// CRC generator polynomial is empty or has a leading zero
    #[error("invalid generator polynomial: {0}")]
    InvalidPolynomial(String),

    /// Simulation parameter out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Character other than `0` or `1` while parsing a bitstring
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
