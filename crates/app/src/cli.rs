//! Command-line interface definitions and parsing

use clap::{Args, Parser, Subcommand};
use ecc_sim_core::{BitString, Technique};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,
}

/// Channel settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ChannelArgs {
    /// Probability that each bit flips in transit (0.0-1.0)
    #[arg(short = 'p', long, default_value_t = 0.1)]
    pub flip_probability: f64,

    /// CRC generator polynomial, most significant bit first
    #[arg(long, default_value = ecc_sim_core::crc::DEFAULT_POLYNOMIAL)]
    pub polynomial: BitString,

    /// Random seed for a reproducible run (default: time-based)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run randomized trials and compare parity, Hamming and CRC
    Compare {
        /// Payload bits per trial (Hamming truncates or pads to 4)
        #[arg(short = 'n', long, default_value_t = 4)]
        data_length: usize,

        /// Number of trials
        #[arg(short, long, default_value_t = 100)]
        iterations: u64,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        channel: ChannelArgs,
    },

    /// Send one payload through the channel using a single technique
    Demo {
        /// parity, hamming or crc
        technique: Technique,

        /// Payload bits to send, e.g. 1011 (default: random)
        #[arg(short, long, conflicts_with = "data_length")]
        data: Option<BitString>,

        /// Length of the random payload (default: 8, or 4 for hamming)
        #[arg(short = 'n', long)]
        data_length: Option<usize>,

        /// Keep check bits safe from the channel
        #[arg(long)]
        protect_check_bits: bool,

        /// Pause between transmission phases
        #[arg(long)]
        animate: bool,

        #[command(flatten)]
        channel: ChannelArgs,
    },
}
