//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing:
//! `portsweep <TARGET> [-p PORTS] [-t THREADS] [--timeout SECS] [-b] [-v] [-o FILE]`

mod scan;

use crate::output::{self, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// A threaded TCP connect port scanner.
///
/// Probes each requested port on a single target and lists the ones that
/// accept a connection. Unset options fall back to the settings file, then
/// to built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A threaded TCP connect port scanner", long_about = None)]
pub struct Cli {
    /// Target IP address or hostname to scan
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan (e.g., "80", "80,443", "1-1000", "22,80,443,8000-9000")
    /// [default: 21,22,23,25,53,80,110,139,143,443,445,3306,3389]
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Number of concurrent worker threads, 1 to 512 [default: 4]
    #[arg(short = 't', long = "threads", allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Per-probe timeout in seconds, fractions allowed [default: 0.5]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Enable banner grabbing
    #[arg(short = 'b', long)]
    pub banner: bool,

    /// Announce ports as they are found and show timing detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write results to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format of the result file
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to a settings file (overrides the default location)
    #[arg(long, value_name = "PATH", env = "PORTSWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "warn,portsweep=debug"
        } else {
            "warn"
        }
    }
}

/// Exit status of a completed run, whatever it found.
pub const EXIT_OK: u8 = 0;

/// Exit status when the run stopped before scanning.
pub const EXIT_FAILURE: u8 = 1;

/// Run the scan described by `cli` and map the outcome to an exit status.
///
/// Errors are printed here; a failed result-file write is only a warning
/// and still exits with [`EXIT_OK`].
pub fn run(cli: &Cli) -> u8 {
    match cli.execute() {
        Ok(()) => EXIT_OK,
        Err(e) => {
            tracing::debug!(error = ?e, "aborting before scan");
            output::print_error(&e.to_string());
            EXIT_FAILURE
        }
    }
}
