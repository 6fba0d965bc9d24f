//! EEG band power CLI
//!
//! Reads a `timestamp, ch1..chC` CSV, computes per-window band powers and
//! writes them as a CSV table.

use anyhow::{Context, Result};
use clap::Parser;
use eeg_bandpower::io::{read_series_from_path, write_records_to_path};
use eeg_bandpower::pipeline::config::DEFAULT_CHANNELS;
use eeg_bandpower::{BandPowerPipeline, ParseMode, PipelineConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eeg-bandpower")]
#[command(version)]
#[command(about = "Sliding-window EEG band power extraction", long_about = None)]
struct Cli {
    /// Input CSV (header row, then timestamp and one column per channel)
    #[arg(long, short, default_value = "eeg_data.csv")]
    input: PathBuf,

    /// Output CSV for band powers in dB
    #[arg(long, short, default_value = "processed_eeg_data.csv")]
    output: PathBuf,

    /// Number of channel columns after the timestamp
    #[arg(long, default_value_t = DEFAULT_CHANNELS)]
    channels: usize,

    /// Fail on malformed numbers instead of reading them as 0
    #[arg(long)]
    strict: bool,

    /// Spread windows across all cores
    #[arg(long)]
    parallel: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let series = read_series_from_path(&cli.input, cli.channels, mode)
        .with_context(|| format!("reading input {}", cli.input.display()))?;

    let pipeline = BandPowerPipeline::new(PipelineConfig::default())
        .context("configuring pipeline")?;

    let records = if cli.parallel {
        pipeline.process_parallel(&series)
    } else {
        pipeline.process(&series)
    };

    tracing::info!(
        samples = series.len(),
        channels = series.channel_count(),
        windows = records.len(),
        "band powers computed"
    );

    write_records_to_path(&cli.output, &records, cli.channels)
        .with_context(|| format!("writing output {}", cli.output.display()))?;

    println!(
        "Processing complete. Results written to {}",
        cli.output.display()
    );
    Ok(())
}
