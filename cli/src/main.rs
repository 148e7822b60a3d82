//! Tradecraft Simulator CLI - generate a synthetic laundering dataset
//!
//! Usage:
//! ```bash
//! tradecraft-simulator --seed 42 --rounds 3 --format csv --output dataset.csv
//! tradecraft-simulator --roster shells.json --format jsonl
//! ```
//!
//! The engine does all the work; this binary only parses flags, builds the
//! configuration, runs origination -> layering -> extraction, and writes the
//! exported dataset.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tracing::info;

use tradecraft_simulator_core_rs::{ShellConfig, Simulation, SimulationConfig};

/// Generate synthetic bank transactions emulating money-laundering tradecraft
#[derive(Parser)]
#[command(name = "tradecraft-simulator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed for a reproducible dataset
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of layering rounds to run
    #[arg(long, default_value_t = 3)]
    rounds: usize,

    /// Simulation start timestamp (RFC 3339); defaults to now
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Shell roster file: JSON array of {"name", "addresses"} entries.
    /// Defaults to the built-in roster.
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,

    /// Output file; defaults to stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line
    Jsonl,
}

fn builtin_roster() -> Vec<ShellConfig> {
    vec![
        ShellConfig {
            name: "BARLLOWS SERVICES LTD".to_string(),
            addresses: vec![
                "3 Market Parade, 41 East Street, Bromley, BR1 1QN".to_string(),
                "31 Quernmore Close, Bromley, Kent, United Kingdom, BR1 4EL".to_string(),
            ],
        },
        ShellConfig {
            name: "LMAR (GB) LTD".to_string(),
            addresses: vec![
                "31 Quernmore Close, Bromley, Kent, United Kingdom, BR1 4EL".to_string(),
            ],
        },
        ShellConfig {
            name: "WELLHANCIA HEALTH CARE LTD".to_string(),
            addresses: vec!["31 Quernmore Close, Bromley, BR1 4EL".to_string()],
        },
    ]
}

fn load_roster(path: &Path) -> Result<Vec<ShellConfig>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open roster file {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("failed to parse roster file {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let shells = match &cli.roster {
        Some(path) => load_roster(path)?,
        None => builtin_roster(),
    };

    let config = SimulationConfig {
        start: cli.start,
        rng_seed: cli.seed,
        shells,
        ..Default::default()
    };

    let mut sim = Simulation::new(config).context("invalid simulation config")?;

    sim.seed_shell_companies()?;
    info!(
        shells = sim.shells().len(),
        deposits = sim.xact_log().len(),
        "origination complete"
    );

    for round in 1..=cli.rounds {
        sim.layer_rmf()?;
        info!(round, "layering round complete");
    }

    sim.drain_into_deals()?;
    info!(transactions = sim.xact_log().len(), "balances drained");

    let dataset = sim.export();
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        Format::Csv => dataset.write_csv(&mut writer)?,
        Format::Jsonl => dataset.write_json_lines(&mut writer)?,
    }

    Ok(())
}
