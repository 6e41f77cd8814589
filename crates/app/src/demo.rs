//! Single-technique demonstration.
//!
//! Sends one payload through the channel with one technique, advancing the
//! staged transmission tick by tick, then shows what the receiver concluded.

use crate::config::{Config, Payload};
use anyhow::Result;
use ecc_sim_core::channel::{ChannelConfig, NoisyChannel};
use ecc_sim_core::transmission::{Phase, Transmission};
use ecc_sim_core::{bitstring, crc, hamming, parity, BitString, Technique, TrialOutcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use tracing::debug;

/// Run a demo with the given technique and payload.
pub fn run(
    config: &Config,
    technique: Technique,
    payload: &Payload,
    protect_check_bits: bool,
    animate: bool,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let data = match payload {
        Payload::Given(bits) => bits.clone(),
        Payload::Random(len) => bitstring::generate(*len, &mut rng),
    };

    let encoded = technique.encode(&data, &config.polynomial)?;
    let check_positions = technique.check_positions(encoded.len(), &config.polynomial)?;
    let protected = if protect_check_bits {
        check_positions.clone()
    } else {
        BTreeSet::new()
    };

    // Separate stream so the channel does not replay the payload draws
    let mut channel = NoisyChannel::new(ChannelConfig {
        flip_probability: config.flip_probability,
        seed: rng.gen(),
    })?;

    println!("=== {} ===", technique);
    println!("Data:     {}", data);
    println!("Encoded:  {}", encoded);
    println!("          {}", position_kinds(encoded.len(), &check_positions));
    println!();

    let mut transmission = Transmission::new(encoded, protected);
    transmission.start();

    while transmission.phase() != Phase::Complete {
        let phase = transmission.phase();
        debug!(?phase, dwell_ms = (phase.dwell().as_millis() as u64), "transmission phase");
        if animate {
            println!("[{:?}]", phase);
            std::thread::sleep(phase.dwell());
        }
        transmission.tick(&mut channel);
    }

    let flipped = transmission
        .outcome()
        .map(|outcome| outcome.flipped.clone())
        .unwrap_or_default();
    let received = transmission.received();

    println!("Received: {}", received);
    println!("          {}", flip_markers(received.len(), &flipped));
    println!(
        "{} bit{} flipped in transit",
        flipped.len(),
        if flipped.len() == 1 { "" } else { "s" }
    );
    println!();

    report_receiver(technique, received, &config.polynomial)?;

    let verdict = technique.classify(&data, received, &config.polynomial)?;
    println!("Outcome: {}", describe(verdict));

    Ok(())
}

/// Print what the receiving side computes for each technique.
fn report_receiver(technique: Technique, received: &BitString, polynomial: &BitString) -> Result<()> {
    match technique {
        Technique::Parity => {
            let ok = parity::verify(received);
            println!(
                "Parity check: {} ({} ones)",
                if ok { "passed" } else { "FAILED" },
                received.count_ones()
            );
        }
        Technique::Hamming => {
            let syndrome = hamming::syndrome(received)?;
            let result = hamming::decode(received)?;
            println!("Syndrome: {}", syndrome);
            match result.error_position {
                Some(position) => println!("Corrected bit at position {}", position),
                None => println!("No correction applied"),
            }
            println!("Decoded data: {}", result.data);
        }
        Technique::Crc => {
            let remainder = crc::remainder(received, polynomial)?;
            println!("Remainder: {}", remainder);
            println!(
                "CRC check: {}",
                if remainder.is_all_zeros() { "passed" } else { "FAILED" }
            );
        }
    }
    Ok(())
}

fn describe(outcome: TrialOutcome) -> &'static str {
    match outcome {
        TrialOutcome::Clean => "payload delivered intact",
        TrialOutcome::Detected => "error detected",
        TrialOutcome::Corrected => "error corrected",
        TrialOutcome::Undetected => "payload corrupted without detection",
    }
}

/// `C` under check bits, `.` under payload bits.
fn position_kinds(len: usize, check_positions: &BTreeSet<usize>) -> String {
    (0..len)
        .map(|i| if check_positions.contains(&i) { 'C' } else { '.' })
        .collect()
}

/// `^` under each flipped bit.
fn flip_markers(len: usize, flipped: &[usize]) -> String {
    (0..len)
        .map(|i| if flipped.contains(&i) { '^' } else { ' ' })
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_kinds() {
        let checks: BTreeSet<usize> = [0, 1, 3].into_iter().collect();
        assert_eq!(position_kinds(7, &checks), "CC.C...");
    }

    #[test]
    fn test_flip_markers() {
        assert_eq!(flip_markers(7, &[2, 5]), "  ^  ^");
        assert_eq!(flip_markers(4, &[]), "");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(TrialOutcome::Corrected), "error corrected");
    }
}
