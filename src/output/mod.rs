//! Result reporting.
//!
//! Console rendering lives in [`plain`]; result files can be written as
//! plain text, JSON, or CSV.

mod csv_format;
mod json_format;
mod plain;
mod text_format;

pub use csv_format::render_csv;
pub use json_format::render_json;
pub use plain::{
    format_listing, format_port_entry, print_discovery, print_error, print_info,
    print_scan_header, print_warning,
};
pub use text_format::{read_text_report, render_text};

use crate::error::OutputError;
use crate::scanner::{ResultSet, ScanConfig};
use crate::types::ScanTarget;
use std::fs;
use std::path::PathBuf;

/// File format for the result file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Text,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Where and how to persist results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDestination {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl OutputDestination {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

/// Render results in the requested file format.
pub fn render(
    results: &ResultSet,
    target: &ScanTarget,
    format: OutputFormat,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(render_text(results, target)),
        OutputFormat::Json => render_json(results, target),
        OutputFormat::Csv => render_csv(results),
    }
}

/// Persist results to `destination`.
pub fn write_report(
    results: &ResultSet,
    target: &ScanTarget,
    destination: &OutputDestination,
) -> Result<(), OutputError> {
    let rendered = render(results, target, destination.format)?;
    fs::write(&destination.path, rendered).map_err(|source| OutputError::Write {
        path: destination.path.clone(),
        source,
    })
}

/// Report a finished scan on the console and, if configured, to a file.
///
/// File errors are downgraded to a warning; the console report is always
/// complete.
pub fn report(results: &ResultSet, config: &ScanConfig) {
    // In verbose mode each port was already announced as it was found.
    if !config.verbose {
        print!("{}", format_listing(results, &config.target));
    }
    plain::print_summary(results, config);

    if let Some(destination) = &config.output {
        match write_report(results, &config.target, destination) {
            Ok(()) => print_info(&format!(
                "Results saved to {} ({})",
                destination.path.display(),
                destination.format
            )),
            Err(e) => {
                tracing::warn!(error = %e, "could not write result file");
                print_warning(&format!("{e}; results were not saved"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{run_scan, ProbeResult, Prober};
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};
    use std::num::NonZeroUsize;
    use std::time::Duration;

    struct OpenOn(Vec<u16>);

    impl Prober for OpenOn {
        fn probe(&self, port: Port) -> Option<ProbeResult> {
            self.0.contains(&port.as_u16()).then(|| {
                let banner = (port.as_u16() == 80).then(|| "HTTP/1.1 200 OK".to_string());
                ProbeResult::open(port).with_banner(banner)
            })
        }

        fn target(&self) -> IpAddr {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(10)
        }
    }

    fn sample() -> (ResultSet, ScanTarget) {
        let ports = [22, 80, 443, 9999].iter().filter_map(|&p| Port::new(p)).collect();
        let results = run_scan(
            &OpenOn(vec![22, 80, 9999]),
            ports,
            NonZeroUsize::new(2).unwrap(),
            |_| {},
        );
        let target = ScanTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
        (results, target)
    }

    #[test]
    fn test_write_text_report_round_trip() {
        let (results, target) = sample();
        let dir = tempfile::tempdir().unwrap();
        let destination = OutputDestination::new(dir.path().join("scan.txt"), OutputFormat::Text);

        write_report(&results, &target, &destination).unwrap();

        let written = fs::read_to_string(&destination.path).unwrap();
        let parsed = read_text_report(&written);
        let expected: Vec<(u16, String)> = results
            .sorted()
            .iter()
            .map(|r| (r.port.as_u16(), r.service.clone()))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_write_json_report() {
        let (results, target) = sample();
        let dir = tempfile::tempdir().unwrap();
        let destination = OutputDestination::new(dir.path().join("scan.json"), OutputFormat::Json);

        write_report(&results, &target, &destination).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&destination.path).unwrap()).unwrap();
        assert_eq!(value["open_ports"], 3);
        assert_eq!(value["results"][1]["port"], 80);
        assert_eq!(value["results"][1]["banner"], "HTTP/1.1 200 OK");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let (results, target) = sample();
        let dir = tempfile::tempdir().unwrap();
        let destination = OutputDestination::new(
            dir.path().join("missing").join("scan.txt"),
            OutputFormat::Text,
        );

        let err = write_report(&results, &target, &destination).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
    }

    #[test]
    fn test_report_survives_write_failure() {
        let (results, target) = sample();
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig::new(target, Vec::new()).with_output(OutputDestination::new(
            dir.path().join("missing").join("scan.txt"),
            OutputFormat::Text,
        ));

        // Must warn, not panic.
        report(&results, &config);
        assert_eq!(results.len(), 3);
    }
}
