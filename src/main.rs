mod cli;
mod compute_cmd;
mod config;
mod convert;
mod input;
mod logging;
mod thresholds_cmd;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Thresholds(args) => thresholds_cmd::run(args),
        Command::Compute(args) => compute_cmd::run(args),
    }
}

/// Size the global rayon pool. `None` or `0` keeps one thread per core.
pub(crate) fn init_thread_pool(threads: Option<usize>) -> Result<()> {
    let Some(n) = threads.filter(|&n| n > 0) else {
        return Ok(());
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build_global()
        .context("failed to build thread pool")?;
    debug!(threads = n, "thread pool ready");
    Ok(())
}
