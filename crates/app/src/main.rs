//! ecc-sim: explore parity, Hamming(7,4) and CRC over a noisy channel.

mod cli;
mod config;
mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{Config, Mode};
use ecc_sim_core::harness;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::from_cli(&cli).context("invalid configuration")?;
    if cli.print_config {
        config.print();
    }
    info!(seed = config.seed, "starting run (replay with --seed {})", config.seed);

    match &config.mode {
        Mode::Compare { json, .. } => run_compare(&config, *json)?,
        Mode::Demo {
            technique,
            payload,
            protect_check_bits,
            animate,
        } => demo::run(&config, *technique, payload, *protect_check_bits, *animate)?,
    }

    Ok(())
}

fn run_compare(config: &Config, json: bool) -> Result<()> {
    let comparison = config
        .comparison()
        .context("comparison parameters missing")?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let report = harness::run(&comparison, &mut rng).context("comparison failed")?;
    info!(iterations = report.iterations, "comparison finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_summary();
    }
    Ok(())
}

/// Setup logging based on verbosity level
fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
