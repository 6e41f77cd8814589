//! ecc-sim-core: Error detection and correction over a simulated noisy channel
//!
//! This library provides the engine for a learning-focused system that:
//! - Encodes payloads with even parity, Hamming(7,4), or a polynomial CRC
//! - Corrupts codewords with independent per-bit flips
//! - Decodes/verifies what arrives and classifies each outcome
//! - Compares the three techniques over many randomized trials
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitstring`: Fixed-length bit sequences and random payloads
//! - `parity`: Single even-parity bit
//! - `hamming`: Hamming(7,4) single-error correction
//! - `crc`: Polynomial division CRC with a configurable generator
//! - `channel`: Binary symmetric channel with protected positions
//! - `technique`: Uniform encode/classify over the three codecs
//! - `harness`: Repeated trials and outcome tallies
//! - `metrics`: Aggregate counters and the comparison report
//! - `transmission`: Tick-driven staged transmission of one codeword
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and returned to the caller
//! - **Pure**: Codecs are functions over values; no shared mutable state
//! - **Deterministic**: Randomness is injected, so seeded runs reproduce

pub mod bitstring;
pub mod channel;
pub mod crc;
pub mod error;
pub mod hamming;
pub mod harness;
pub mod metrics;
pub mod parity;
pub mod technique;
pub mod transmission;

// Re-export commonly used types
pub use bitstring::BitString;
pub use error::{Error, Result};
pub use technique::{Technique, TrialOutcome};
