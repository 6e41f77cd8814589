//! Comparison harness: many trials, three techniques, one channel.
//!
//! Each trial draws one random payload and sends it, encoded three ways,
//! through independent channel transmissions with the same flip
//! probability. Every technique's verdict is classified and counted.
//!
//! # Hamming payloads
//!
//! Hamming(7,4) only carries 4 data bits. In comparison mode its payload is
//! the trial payload truncated (if longer) or right-padded with `0` (if
//! shorter) to 4 bits, and that normalized word is what its decode is judged
//! against. With a payload length other than 4, Hamming is therefore not
//! protecting the same data as parity and CRC.
//!
//! # Random draw order
//!
//! Per trial: payload bits, then the parity codeword's channel draws, then
//! Hamming's, then CRC's. A fixed seed reproduces a run exactly.

use crate::bitstring::{self, BitString};
use crate::channel::{self, validate_probability};
use crate::crc;
use crate::error::{Error, Result};
use crate::hamming;
use crate::metrics::ComparisonReport;
use crate::technique::{Technique, TrialOutcome};
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Parameters of a comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Bits of random payload per trial
    pub data_length: usize,

    /// Per-bit flip probability [0.0, 1.0]
    pub flip_probability: f64,

    /// Number of independent trials (must be positive)
    pub iterations: u64,

    /// CRC generator polynomial
    pub polynomial: BitString,
}

impl ComparisonConfig {
    /// Config with the default CRC generator (`1011`).
    pub fn new(data_length: usize, flip_probability: f64, iterations: u64) -> Self {
        Self {
            data_length,
            flip_probability,
            iterations,
            polynomial: crc::default_polynomial(),
        }
    }

    pub fn with_polynomial(mut self, polynomial: BitString) -> Self {
        self.polynomial = polynomial;
        self
    }

    /// Check every parameter before any trial runs.
    ///
    /// # Errors
    /// - `Error::InvalidParameter` for zero iterations or a bad probability
    /// - `Error::InvalidPolynomial` for a malformed generator
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidParameter(
                "iteration count must be positive".to_string(),
            ));
        }
        validate_probability(self.flip_probability)?;
        crc::degree(&self.polynomial)?;
        Ok(())
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self::new(4, 0.1, 100)
    }
}

/// Outcome of a single trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialResult {
    /// The random payload shared by all techniques
    pub payload: BitString,

    pub parity: TrialOutcome,
    pub hamming: TrialOutcome,
    pub crc: TrialOutcome,
}

impl TrialResult {
    pub fn outcome(&self, technique: Technique) -> TrialOutcome {
        match technique {
            Technique::Parity => self.parity,
            Technique::Hamming => self.hamming,
            Technique::Crc => self.crc,
        }
    }
}

/// Fit a payload to Hamming(7,4): truncate or right-pad with `0` to 4 bits.
pub fn normalize_hamming_payload(payload: &BitString) -> BitString {
    payload.resized(hamming::DATA_BITS)
}

/// Run the full comparison.
///
/// # Errors
/// Returns the first validation error; trials never fail once validated.
pub fn run<R: Rng + ?Sized>(config: &ComparisonConfig, rng: &mut R) -> Result<ComparisonReport> {
    config.validate()?;

    let mut report = ComparisonReport::new(
        config.data_length,
        config.flip_probability,
        config.iterations,
        config.polynomial.clone(),
    );

    for iteration in 0..config.iterations {
        let trial = run_trial(config, rng)?;
        trace!(
            iteration,
            payload = %trial.payload,
            parity = ?trial.parity,
            hamming = ?trial.hamming,
            crc = ?trial.crc,
            "trial complete"
        );
        for technique in Technique::ALL {
            report.record(technique, trial.outcome(technique));
        }
    }

    debug!(
        iterations = config.iterations,
        data_length = config.data_length,
        flip_probability = config.flip_probability,
        "comparison complete"
    );

    Ok(report)
}

/// Run one trial: generate, encode three ways, transmit each, classify.
///
/// # Errors
/// Returns `Error::InvalidParameter` / `Error::InvalidPolynomial` if the
/// config is invalid.
pub fn run_trial<R: Rng + ?Sized>(config: &ComparisonConfig, rng: &mut R) -> Result<TrialResult> {
    let payload = bitstring::generate(config.data_length, rng);
    let hamming_payload = normalize_hamming_payload(&payload);

    let parity = send_and_classify(Technique::Parity, &payload, config, rng)?;
    let hamming = send_and_classify(Technique::Hamming, &hamming_payload, config, rng)?;
    let crc = send_and_classify(Technique::Crc, &payload, config, rng)?;

    Ok(TrialResult {
        payload,
        parity,
        hamming,
        crc,
    })
}

fn send_and_classify<R: Rng + ?Sized>(
    technique: Technique,
    payload: &BitString,
    config: &ComparisonConfig,
    rng: &mut R,
) -> Result<TrialOutcome> {
    let encoded = technique.encode(payload, &config.polynomial)?;
    let outcome = channel::transmit(&encoded, config.flip_probability, &BTreeSet::new(), rng)?;
    technique.classify(payload, &outcome.received, &config.polynomial)
}
