//! Tachometer Simulator - 50 hour jet engine endurance run
//!
//! Samples one engine speed reading per simulated minute, logs every tick to
//! `flight_log.csv` and prints band notices plus a final maintenance verdict
//! on stdout.
//!
//! # Usage
//!
//! ```bash
//! # Default run: 3000 ticks x 60 s into ./flight_log.csv
//! cargo run --release
//!
//! # Reproducible short run, verdict only
//! cargo run --release -- --ticks 600 --seed 42 --quiet
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use tachometer_sim::sink::StdoutNotifier;
use tachometer_sim::{run_to_path, RpmGenerator, SimulationConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "tachometer-sim")]
#[command(about = "Jet engine tachometer simulator with maintenance diagnostics")]
#[command(version)]
struct CliArgs {
    /// TOML file with run settings (ticks, tick_seconds, output, seed)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u32>,

    /// Simulated seconds per tick
    #[arg(long)]
    tick_seconds: Option<f64>,

    /// CSV flight log path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Suppress per-tick band notices (verdict and summary are still printed)
    #[arg(short, long)]
    quiet: bool,
}

impl CliArgs {
    fn into_config(self) -> Result<(SimulationConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(tick_seconds) = self.tick_seconds {
            config.tick_seconds = tick_seconds;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid run settings")?;
        Ok((config, self.quiet))
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (config, quiet) = CliArgs::parse().into_config()?;
    let output = config.output.clone();

    if let Some(seed) = config.seed {
        info!(seed, "Using fixed RNG seed");
    }
    let generator = RpmGenerator::from_seed(config.seed);

    let mut notifier = StdoutNotifier;
    let report = run_to_path(config, generator, &mut notifier, !quiet)
        .with_context(|| format!("Simulation aborted (flight log: {})", output.display()))?;

    info!(
        ticks = report.ticks,
        engine_time = %report.counters,
        zone_transitions = report.zone_transitions,
        verdict = %report.diagnostic.status(),
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Run summary"
    );
    for band in tachometer_sim::PowerBand::ALL {
        info!(band = %band, ticks = report.band_ticks.count(band), "Time in band");
    }

    Ok(())
}
