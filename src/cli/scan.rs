//! Scan execution.
//!
//! Turns parsed arguments into a [`ScanConfig`], runs the scan and hands
//! the results to the reporter.

use super::Cli;
use crate::config::Settings;
use crate::error::{CliResult, ConfigError};
use crate::output::{self, OutputDestination};
use crate::scanner::{self, ScanConfig, MAX_CONCURRENCY};
use crate::types::{self, PortSpec};
use std::num::NonZeroUsize;
use std::time::Duration;

impl Cli {
    /// Load settings, falling back to defaults with a warning when the
    /// file cannot be used.
    fn settings(&self) -> Settings {
        let loaded = match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        };

        loaded.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring settings file");
            output::print_warning(&format!("{e}; using built-in defaults"));
            Settings::default()
        })
    }

    /// Validate the arguments and resolve the target.
    ///
    /// This is the only place a run can fail: bad ports, bad settings or an
    /// unresolvable target all stop here, before any probe is sent.
    pub fn build_config(&self, settings: &Settings) -> CliResult<ScanConfig> {
        let threads = self
            .threads
            .unwrap_or_else(|| i64::try_from(settings.threads).unwrap_or(i64::MAX));
        let concurrency = parse_threads(threads)?;

        let timeout_secs = self.timeout.unwrap_or(settings.timeout_secs);
        let timeout = parse_timeout(timeout_secs)?;

        let target = types::resolve(&self.target)?;

        let spec: PortSpec = self
            .ports
            .as_deref()
            .unwrap_or(settings.ports.as_str())
            .parse()?;

        let mut config = ScanConfig::new(target, spec.to_ports())
            .with_concurrency(concurrency)
            .with_timeout(timeout);

        if self.banner || settings.banner {
            config = config.with_banners();
        }
        if self.verbose {
            config = config.with_verbose();
        }
        if let Some(path) = &self.output {
            config = config.with_output(OutputDestination::new(path, self.format));
        }

        Ok(config)
    }

    /// Execute the scan command.
    pub fn execute(&self) -> CliResult<()> {
        let settings = self.settings();
        let config = self.build_config(&settings)?;

        output::print_scan_header(&config);
        let results = scanner::scan(&config);
        output::report(&results, &config);

        Ok(())
    }
}

fn parse_threads(raw: i64) -> Result<NonZeroUsize, ConfigError> {
    usize::try_from(raw)
        .ok()
        .filter(|&n| n <= MAX_CONCURRENCY)
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            ConfigError::Invalid(format!(
                "thread count must be between 1 and {MAX_CONCURRENCY}, got {raw}"
            ))
        })
}

fn parse_timeout(secs: f64) -> Result<Duration, ConfigError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(ConfigError::Invalid(format!(
            "timeout must be a positive number of seconds, got {secs}"
        ))),
    }
}
