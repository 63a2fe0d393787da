//! # portsweep - A threaded TCP connect port scanner
//!
//! portsweep probes the TCP ports of a single host and reports which ones
//! accept a connection, optionally reading a one-line banner from each.
//!
//! ## Features
//!
//! - **Worker pool**: a fixed number of OS threads drain a static port list
//! - **Flexible port lists**: singles and ranges, e.g. `22,80,8000-8100`
//! - **Banner grabbing**: best-effort first line after a minimal HTTP request
//! - **Result files**: plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use portsweep::scanner::{scan, ScanConfig};
//! use portsweep::types::{resolve, PortSpec};
//!
//! let target = resolve("127.0.0.1").unwrap();
//! let ports = "22,80,443".parse::<PortSpec>().unwrap().to_ports();
//! let results = scan(&ScanConfig::new(target, ports));
//!
//! for result in results.sorted() {
//!     println!("{} ({}) is open", result.port, result.service);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port specifications and target resolution
//! - [`scanner`] - The `Prober` trait, the TCP prober and the worker pool
//! - [`banner`] - Bounded banner reads
//! - [`services`] - Well-known port names
//! - [`output`] - Console and file reporting
//! - [`config`] - Settings file
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ProbeError};
pub use scanner::{ProbeResult, Prober, ResultSet, ScanConfig};
pub use types::{Port, PortSpec, ScanTarget};
