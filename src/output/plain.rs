//! Console output formatting.
//!
//! Styling comes from `console`, which drops colours when stdout is not a
//! terminal.

use crate::scanner::{ProbeResult, ResultSet, ScanConfig};
use crate::types::ScanTarget;
use console::style;
use std::io::{self, Write};

/// Render one open port as it appears in listings and announcements.
pub fn format_port_entry(result: &ProbeResult) -> String {
    let mut entry = format!("Port {} ({}) open", result.port, result.service);
    if let Some(banner) = &result.banner {
        entry.push_str(&format!("\n      Banner: {banner}"));
    }
    entry
}

/// Render the full open-port listing shown after a non-verbose scan.
pub fn format_listing(results: &ResultSet, target: &ScanTarget) -> String {
    if results.is_empty() {
        return format!("{}\n", style(format!("No open ports found on {target}.")).dim());
    }

    let mut out = format!("{}\n", style(format!("Open ports on {target}:")).bold());
    for result in results.sorted() {
        out.push_str(&format!(
            "  {} {}\n",
            style("[+]").green().bold(),
            format_port_entry(result)
        ));
    }
    out
}

/// Announce a port the moment a worker finds it.
///
/// Called from worker threads. The whole entry is written under one stdout
/// lock so concurrent announcements never interleave.
pub fn print_discovery(result: &ProbeResult) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(
        out,
        "  {} {}",
        style("[+]").green().bold(),
        format_port_entry(result)
    );
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(config: &ScanConfig) {
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Target: {}",
        style("•").dim(),
        style(&config.target).white().bold()
    );
    println!(
        "{} Scanning {} ports with {} workers...",
        style("•").dim(),
        style(config.ports.len()).white().bold(),
        config.concurrency
    );
    println!();
}

/// Print the closing summary line, plus timing detail in verbose mode.
pub(super) fn print_summary(results: &ResultSet, config: &ScanConfig) {
    println!();
    println!(
        "{} Scan completed in {:.2}s: {} open port(s) found",
        style("✓").green().bold(),
        results.elapsed().as_secs_f64(),
        style(results.len()).green().bold()
    );

    if config.verbose {
        println!(
            "{} {} ports probed by {} workers, {:.2}s timeout per probe{}",
            style("•").dim(),
            results.ports_scanned(),
            config.concurrency.get().min(results.ports_scanned()),
            config.timeout.as_secs_f64(),
            if config.grab_banner { ", banners on" } else { "" }
        );
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
