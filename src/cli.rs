use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Heat Wave Magnitude Index daily (HWMId) for gridded daily temperature.
#[derive(Parser)]
#[command(
    name = "hwmid",
    version,
    about = "Heat Wave Magnitude Index daily from gridded daily temperature"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute (or load cached) reference thresholds and write them out.
    Thresholds(ThresholdsArgs),
    /// Compute per-year HWMId of target datasets against reference thresholds.
    Compute(ComputeArgs),
}

/// Options shared by both subcommands.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hwmid.toml")]
    pub config: PathBuf,

    /// Only process these reference identifiers (repeatable).
    #[arg(short, long = "reference")]
    pub references: Vec<String>,

    /// Recompute thresholds even when a cached entry exists.
    #[arg(short, long)]
    pub force: bool,

    /// Worker threads (default: config value, else one per core).
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `thresholds` subcommand.
#[derive(clap::Args)]
pub struct ThresholdsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only process these target identifiers (repeatable).
    #[arg(short, long = "target")]
    pub targets: Vec<String>,
}
