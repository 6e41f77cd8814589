//! Outcome counters and the comparison report.
//!
//! This module turns per-trial classifications into observable totals:
//! - Detected / corrected / undetected counts per technique
//! - Rates derived from those counts (never stored)
//! - A human-readable summary and a `key=value` export
//!
//! # Design
//!
//! Counters are plain values updated once per trial by the harness. Once the
//! harness returns its `ComparisonReport`, nothing mutates it.

use crate::bitstring::BitString;
use crate::technique::{Technique, TrialOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome totals for one technique across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    /// Corruption flagged (including Hamming miscorrections)
    pub detected: u64,

    /// Hamming corrections that restored the payload
    pub corrected: u64,

    /// Payload changed without being flagged
    pub undetected: u64,
}

impl AggregateResult {
    /// Count one trial. Clean trials are not counted.
    pub fn record(&mut self, outcome: TrialOutcome) {
        match outcome {
            TrialOutcome::Clean => {}
            TrialOutcome::Detected => self.detected += 1,
            TrialOutcome::Corrected => self.corrected += 1,
            TrialOutcome::Undetected => self.undetected += 1,
        }
    }

    /// Trials that landed in any bucket.
    pub fn total(&self) -> u64 {
        self.detected + self.corrected + self.undetected
    }
}

/// Results of a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Payload length per trial
    pub data_length: usize,

    /// Per-bit flip probability used for every transmission
    pub flip_probability: f64,

    /// Trials run
    pub iterations: u64,

    /// CRC generator polynomial
    pub polynomial: BitString,

    /// Totals per technique
    pub results: BTreeMap<Technique, AggregateResult>,
}

impl ComparisonReport {
    /// Empty report with a zeroed counter for every technique.
    pub fn new(data_length: usize, flip_probability: f64, iterations: u64, polynomial: BitString) -> Self {
        Self {
            data_length,
            flip_probability,
            iterations,
            polynomial,
            results: Technique::ALL
                .iter()
                .map(|&t| (t, AggregateResult::default()))
                .collect(),
        }
    }

    /// Totals for one technique.
    pub fn get(&self, technique: Technique) -> AggregateResult {
        self.results.get(&technique).copied().unwrap_or_default()
    }

    pub(crate) fn record(&mut self, technique: Technique, outcome: TrialOutcome) {
        self.results.entry(technique).or_default().record(outcome);
    }

    /// Fraction of trials in which `technique` flagged corruption.
    pub fn detected_rate(&self, technique: Technique) -> f64 {
        self.rate(self.get(technique).detected)
    }

    /// Fraction of trials in which `technique` repaired the payload.
    pub fn corrected_rate(&self, technique: Technique) -> f64 {
        self.rate(self.get(technique).corrected)
    }

    /// Fraction of trials in which corruption slipped through.
    pub fn undetected_rate(&self, technique: Technique) -> f64 {
        self.rate(self.get(technique).undetected)
    }

    fn rate(&self, count: u64) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            count as f64 / self.iterations as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Comparison Summary ===");
        println!("Iterations: {}", self.iterations);
        println!("Data length: {} bits", self.data_length);
        println!("Flip probability: {:.2}%", self.flip_probability * 100.0);
        println!("CRC polynomial: {}", self.polynomial);
        println!();

        println!("{:<10} {:>16} {:>16} {:>16}", "Technique", "Detected", "Corrected", "Undetected");
        for &technique in &Technique::ALL {
            let result = self.get(technique);
            println!(
                "{:<10} {:>8} ({:>5.1}%) {:>8} ({:>5.1}%) {:>8} ({:>5.1}%)",
                technique.name(),
                result.detected,
                self.detected_rate(technique) * 100.0,
                result.corrected,
                self.corrected_rate(technique) * 100.0,
                result.undetected,
                self.undetected_rate(technique) * 100.0,
            );
        }
        println!();

        if self.data_length != crate::hamming::DATA_BITS {
            println!(
                "Note: Hamming(7,4) payloads were {} to {} bits.",
                if self.data_length > crate::hamming::DATA_BITS { "truncated" } else { "zero-padded" },
                crate::hamming::DATA_BITS
            );
            println!();
        }
    }

    /// Export results as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        let mut out = format!(
            "iterations={}\n\
             data_length={}\n\
             flip_probability={:.4}\n\
             polynomial={}\n",
            self.iterations, self.data_length, self.flip_probability, self.polynomial,
        );

        for &technique in &Technique::ALL {
            let key = technique.name().to_ascii_lowercase();
            let result = self.get(technique);
            out.push_str(&format!(
                "{key}_detected={}\n\
                 {key}_corrected={}\n\
                 {key}_undetected={}\n",
                result.detected, result.corrected, result.undetected,
            ));
        }

        out
    }
}
