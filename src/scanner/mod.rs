//! Scanner module - probes and the worker pool that runs them.
//!
//! [`engine::run_scan`] drains a static list of ports with a fixed number
//! of OS threads, each invoking a [`Prober`] per claimed port.

pub mod engine;
pub mod queue;
pub mod tcp;
pub mod traits;

pub use engine::{
    run_scan, scan, ResultSet, ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, MAX_CONCURRENCY,
};
pub use queue::WorkQueue;
pub use tcp::TcpProber;
pub use traits::{ProbeResult, Prober};
