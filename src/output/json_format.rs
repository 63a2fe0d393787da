//! JSON result files.

use crate::error::OutputError;
use crate::scanner::{ProbeResult, ResultSet};
use crate::types::ScanTarget;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    ip_address: String,
    ports_scanned: usize,
    open_ports: usize,
    duration_ms: u64,
    results: Vec<&'a ProbeResult>,
}

/// Render results as pretty-printed JSON, sorted by port.
pub fn render_json(results: &ResultSet, target: &ScanTarget) -> Result<String, OutputError> {
    let report = JsonReport {
        target: &target.original,
        ip_address: target.ip.to_string(),
        ports_scanned: results.ports_scanned(),
        open_ports: results.len(),
        duration_ms: results.elapsed().as_millis() as u64,
        results: results.sorted(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
