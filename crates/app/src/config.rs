//! Configuration for the ecc-sim application.
//!
//! Turns parsed command-line arguments into a fully resolved, validated run
//! configuration. Every value that was left to a default is filled in here,
//! including the seed, so a printed configuration can be replayed exactly.

use crate::cli::{ChannelArgs, Cli, Commands};
use ecc_sim_core::channel::validate_probability;
use ecc_sim_core::harness::ComparisonConfig;
use ecc_sim_core::{crc, hamming, BitString, Error, Result, Technique};

/// Default random payload length for parity and CRC demos
const DEFAULT_DEMO_LENGTH: usize = 8;

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed for all randomness in the run
    pub seed: u64,

    /// Per-bit flip probability
    pub flip_probability: f64,

    /// CRC generator polynomial
    pub polynomial: BitString,

    pub mode: Mode,
}

/// What the run does.
#[derive(Debug, Clone)]
pub enum Mode {
    Compare {
        data_length: usize,
        iterations: u64,
        json: bool,
    },
    Demo {
        technique: Technique,
        payload: Payload,
        protect_check_bits: bool,
        animate: bool,
    },
}

/// Where a demo payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Given(BitString),
    Random(usize),
}

impl Config {
    /// Resolve and validate a configuration from parsed arguments.
    ///
    /// # Errors
    /// - `Error::InvalidParameter` for a bad probability or zero iterations
    /// - `Error::InvalidPolynomial` for a malformed generator
    /// - `Error::InvalidLength` for a Hamming demo payload that is not 4 bits
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        match &cli.command {
            Commands::Compare {
                data_length,
                iterations,
                json,
                channel,
            } => {
                let config = Self::with_channel(
                    channel,
                    Mode::Compare {
                        data_length: *data_length,
                        iterations: *iterations,
                        json: *json,
                    },
                )?;
                config.comparison().map(|c| c.validate()).transpose()?;
                Ok(config)
            }
            Commands::Demo {
                technique,
                data,
                data_length,
                protect_check_bits,
                animate,
                channel,
            } => {
                let payload = match (data, data_length) {
                    (Some(bits), _) => Payload::Given(bits.clone()),
                    (None, Some(len)) => Payload::Random(*len),
                    (None, None) if *technique == Technique::Hamming => Payload::Random(hamming::DATA_BITS),
                    (None, None) => Payload::Random(DEFAULT_DEMO_LENGTH),
                };

                if *technique == Technique::Hamming {
                    let len = match &payload {
                        Payload::Given(bits) => bits.len(),
                        Payload::Random(len) => *len,
                    };
                    if len != hamming::DATA_BITS {
                        return Err(Error::InvalidLength {
                            expected: hamming::DATA_BITS,
                            actual: len,
                        });
                    }
                }

                Self::with_channel(
                    channel,
                    Mode::Demo {
                        technique: *technique,
                        payload,
                        protect_check_bits: *protect_check_bits,
                        animate: *animate,
                    },
                )
            }
        }
    }

    fn with_channel(channel: &ChannelArgs, mode: Mode) -> Result<Self> {
        validate_probability(channel.flip_probability)?;
        crc::degree(&channel.polynomial)?;

        Ok(Self {
            seed: channel.seed.unwrap_or_else(time_seed),
            flip_probability: channel.flip_probability,
            polynomial: channel.polynomial.clone(),
            mode,
        })
    }

    /// Harness parameters, when this is a comparison run.
    pub fn comparison(&self) -> Option<ComparisonConfig> {
        match self.mode {
            Mode::Compare {
                data_length,
                iterations,
                ..
            } => Some(
                ComparisonConfig::new(data_length, self.flip_probability, iterations)
                    .with_polynomial(self.polynomial.clone()),
            ),
            Mode::Demo { .. } => None,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Seed: {}", self.seed);
        println!("Flip probability: {:.2}%", self.flip_probability * 100.0);
        println!("CRC polynomial: {} (degree {})", self.polynomial, self.polynomial.len().saturating_sub(1));
        println!();

        match &self.mode {
            Mode::Compare {
                data_length,
                iterations,
                json,
            } => {
                println!("=== Comparison ===");
                println!("Data length: {} bits", data_length);
                println!("Iterations: {}", iterations);
                println!("Output: {}", if *json { "json" } else { "table" });
            }
            Mode::Demo {
                technique,
                payload,
                protect_check_bits,
                animate,
            } => {
                println!("=== Demo ===");
                println!("Technique: {}", technique);
                match payload {
                    Payload::Given(bits) => println!("Payload: {}", bits),
                    Payload::Random(len) => println!("Payload: random, {} bits", len),
                }
                println!("Protect check bits: {}", protect_check_bits);
                println!("Animate: {}", animate);
            }
        }
        println!();
    }
}

/// Seed derived from the wall clock, for runs without `--seed`.
fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["ecc-sim"];
        argv.extend_from_slice(args);
        Config::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_explicit_seed_kept() {
        let config = parse(&["compare", "--seed", "42"]).unwrap();
        assert_eq!(config.seed, 42);
        let comparison = config.comparison().unwrap();
        assert_eq!(comparison.iterations, 100);
        assert_eq!(comparison.data_length, 4);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            parse(&["compare", "--iterations", "0"]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_probability_out_of_range() {
        assert!(matches!(
            parse(&["compare", "-p", "1.5"]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_leading_zero_polynomial() {
        assert!(matches!(
            parse(&["demo", "crc", "--polynomial", "0101"]),
            Err(Error::InvalidPolynomial(_))
        ));
    }

    #[test]
    fn test_demo_default_lengths() {
        let parity = parse(&["demo", "parity"]).unwrap();
        let hamming = parse(&["demo", "hamming"]).unwrap();

        assert!(matches!(
            parity.mode,
            Mode::Demo {
                payload: Payload::Random(8),
                ..
            }
        ));
        assert!(matches!(
            hamming.mode,
            Mode::Demo {
                payload: Payload::Random(4),
                ..
            }
        ));
        assert!(hamming.comparison().is_none());
    }

    #[test]
    fn test_hamming_demo_needs_four_bits() {
        assert_eq!(
            parse(&["demo", "hamming", "--data", "101"]).unwrap_err(),
            Error::InvalidLength {
                expected: 4,
                actual: 3
            }
        );
        assert!(parse(&["demo", "hamming", "-n", "6"]).is_err());
    }
}
