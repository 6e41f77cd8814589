//! Noisy binary channel with independent per-bit flips.
//!
//! This module models a binary symmetric channel: every eligible bit is
//! inverted independently with the same probability. Callers may exempt
//! positions (typically check bits) to study payload-only corruption.
//!
//! # Determinism
//!
//! Randomness is always injected. The free function `transmit` draws from
//! whatever `Rng` it is handed; `NoisyChannel` owns a ChaCha8 stream seeded
//! from its config. Given the same seed and inputs, outputs are
//! bit-identical.

use crate::bitstring::BitString;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

/// The result of pushing one codeword through the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutcome {
    /// What the receiver sees
    pub received: BitString,

    /// Indices that were actually flipped, ascending
    pub flipped: Vec<usize>,
}

impl ChannelOutcome {
    /// True if at least one bit was flipped.
    pub fn is_corrupted(&self) -> bool {
        !self.flipped.is_empty()
    }
}

/// Reject probabilities outside `[0, 1]` (NaN included).
pub fn validate_probability(flip_probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&flip_probability) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "flip probability {} is outside [0, 1]",
            flip_probability
        )))
    }
}

/// Transmit `encoded`, flipping each unprotected bit with `flip_probability`.
///
/// One uniform draw is taken per unprotected index, in index order. Protected
/// indices consume no randomness. Protected indices past the end are ignored.
///
/// # Errors
/// Returns `Error::InvalidParameter` if the probability is outside `[0, 1]`.
pub fn transmit<R: Rng + ?Sized>(
    encoded: &BitString,
    flip_probability: f64,
    protected: &BTreeSet<usize>,
    rng: &mut R,
) -> Result<ChannelOutcome> {
    validate_probability(flip_probability)?;
    Ok(corrupt(encoded, flip_probability, protected, rng))
}

fn corrupt<R: Rng + ?Sized>(
    encoded: &BitString,
    flip_probability: f64,
    protected: &BTreeSet<usize>,
    rng: &mut R,
) -> ChannelOutcome {
    let mut received = encoded.clone();
    let mut flipped = Vec::new();

    for index in 0..encoded.len() {
        if protected.contains(&index) {
            continue;
        }
        let roll: f64 = rng.gen();
        if roll < flip_probability {
            received.toggle(index);
            flipped.push(index);
        }
    }

    ChannelOutcome { received, flipped }
}

/// Configuration for a stateful channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Per-bit flip probability [0.0, 1.0]
    pub flip_probability: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never flips anything.
    pub fn perfect(seed: u64) -> Self {
        Self {
            flip_probability: 0.0,
            seed,
        }
    }

    /// A moderately noisy channel (10% flips).
    pub fn default_with_seed(seed: u64) -> Self {
        Self {
            flip_probability: 0.1,
            seed,
        }
    }
}

/// Channel simulator owning its own seeded random stream.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread.
pub struct NoisyChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    messages_sent: u64,
    bits_sent: u64,
    bits_flipped: u64,
}

impl NoisyChannel {
    /// Create a channel, validating the flip probability.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if the probability is outside `[0, 1]`.
    pub fn new(config: ChannelConfig) -> Result<Self> {
        validate_probability(config.flip_probability)?;

        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            messages_sent: 0,
            bits_sent: 0,
            bits_flipped: 0,
        })
    }

    /// Send a codeword with every bit eligible for corruption.
    pub fn send(&mut self, encoded: &BitString) -> ChannelOutcome {
        self.send_protected(encoded, &BTreeSet::new())
    }

    /// Send a codeword, exempting `protected` indices.
    pub fn send_protected(&mut self, encoded: &BitString, protected: &BTreeSet<usize>) -> ChannelOutcome {
        let outcome = corrupt(encoded, self.config.flip_probability, protected, &mut self.rng);

        let exposed = (0..encoded.len()).filter(|i| !protected.contains(i)).count();
        self.messages_sent += 1;
        self.bits_sent += exposed as u64;
        self.bits_flipped += outcome.flipped.len() as u64;

        outcome
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            messages_sent: self.messages_sent,
            bits_sent: self.bits_sent,
            bits_flipped: self.bits_flipped,
        }
    }
}

/// Statistics about channel behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Codewords sent
    pub messages_sent: u64,

    /// Bits exposed to noise (protected bits excluded)
    pub bits_sent: u64,

    /// Bits actually flipped
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed bit error rate (flipped / exposed).
    pub fn bit_error_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}
