//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Only [`CliError`]
//! ever reaches the operator as a fatal error; probe and banner failures
//! are absorbed where they happen.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{PortError, TargetError};

/// Why a single connect attempt did not produce an open port.
///
/// All variants mean "closed or filtered" to the scan engine. The
/// distinction only feeds trace-level diagnostics.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection refused")]
    Refused,

    #[error("connection timed out")]
    TimedOut,

    #[error("network or host unreachable: {0}")]
    Unreachable(#[source] io::Error),

    #[error("connect failed: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Self::TimedOut,
            io::ErrorKind::NetworkUnreachable | io::ErrorKind::HostUnreachable => {
                Self::Unreachable(err)
            }
            _ => Self::Io(err),
        }
    }
}

/// Why a banner could not be read from an open port.
#[derive(Error, Debug)]
pub enum BannerError {
    #[error("banner I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("service sent no data")]
    Empty,

    #[error("banner is not valid UTF-8")]
    Decode(#[from] std::str::Utf8Error),
}

/// Failure writing the result file.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode CSV report: {0}")]
    Csv(#[from] csv::Error),
}

/// Settings file and merged-configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read '{path}': {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Fatal errors that abort a run before scanning starts.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid port specification: {0}")]
    InvalidPortSpec(#[from] PortError),

    #[error("cannot resolve target: {0}")]
    UnresolvableTarget(#[from] TargetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_classification() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert!(matches!(ProbeError::from(refused), ProbeError::Refused));

        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        assert!(matches!(ProbeError::from(timed_out), ProbeError::TimedOut));

        let other = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(ProbeError::from(other), ProbeError::Io(_)));
    }

    #[test]
    fn test_cli_error_messages() {
        let err = CliError::from(PortError::Empty);
        assert_eq!(
            err.to_string(),
            "invalid port specification: empty port specification"
        );
    }
}
