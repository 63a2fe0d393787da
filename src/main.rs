use anyhow::{Context, Result};
use clap::Parser;
use portsweep::cli::{self as app, Cli};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.default_log_filter())?;

    Ok(ExitCode::from(app::run(&cli)))
}
