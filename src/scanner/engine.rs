//! The worker pool that drives a scan.
//!
//! A scan is a fixed list of ports drained by a fixed number of OS
//! threads. Workers claim ports from a shared [`WorkQueue`], probe them,
//! and append open ports to a mutex-guarded result vector. The call
//! returns only after every worker has been joined.
//!
//! There is no retry, no overall deadline and no way to cancel a scan once
//! it has started. The worst-case wall clock is roughly
//! `ports / workers * timeout` (doubled when banners are grabbed).

use crate::output::{self, OutputDestination};
use crate::scanner::queue::WorkQueue;
use crate::scanner::tcp::TcpProber;
use crate::scanner::traits::{ProbeResult, Prober};
use crate::types::{Port, ScanTarget};
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Default number of worker threads.
pub const DEFAULT_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

/// Upper bound on worker threads.
///
/// Each worker holds one socket at a time, so this also keeps a scan well
/// under the usual 1024 open-file limit.
pub const MAX_CONCURRENCY: usize = 512;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Everything one invocation needs, fixed before the scan starts.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Resolved target host.
    pub target: ScanTarget,
    /// Ports to probe, in scheduling order.
    pub ports: Vec<Port>,
    /// Number of worker threads.
    pub concurrency: NonZeroUsize,
    /// Connect deadline per probe; also bounds the banner exchange.
    pub timeout: Duration,
    /// Whether to attempt banner grabbing on open ports.
    pub grab_banner: bool,
    /// Announce ports as they are found and print extra timing detail.
    pub verbose: bool,
    /// Optional result file.
    pub output: Option<OutputDestination>,
}

impl ScanConfig {
    /// Create a configuration with default concurrency and timeout.
    pub fn new(target: ScanTarget, ports: Vec<Port>) -> Self {
        Self {
            target,
            ports,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            grab_banner: false,
            verbose: false,
            output: None,
        }
    }

    /// Set the number of worker threads.
    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable banner grabbing.
    pub fn with_banners(mut self) -> Self {
        self.grab_banner = true;
        self
    }

    /// Enable per-port announcements.
    pub fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Write results to a file as well as the console.
    pub fn with_output(mut self, output: OutputDestination) -> Self {
        self.output = Some(output);
        self
    }
}

/// The finished, read-only outcome of one scan.
#[derive(Debug, Clone)]
pub struct ResultSet {
    results: Vec<ProbeResult>,
    ports_scanned: usize,
    elapsed: Duration,
}

impl ResultSet {
    /// Open ports in the order workers reported them.
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    /// Open ports sorted by port number, for stable rendering.
    pub fn sorted(&self) -> Vec<&ProbeResult> {
        let mut sorted: Vec<&ProbeResult> = self.results.iter().collect();
        sorted.sort_by_key(|r| r.port);
        sorted
    }

    /// Sorted open port numbers.
    pub fn open_ports(&self) -> Vec<u16> {
        self.sorted().iter().map(|r| r.port.as_u16()).collect()
    }

    /// Number of open ports found.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no open port was found.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of ports that were probed.
    pub fn ports_scanned(&self) -> usize {
        self.ports_scanned
    }

    /// Wall-clock duration of the scan.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Scan the configured target with TCP connect probes.
pub fn scan(config: &ScanConfig) -> ResultSet {
    let prober = TcpProber::new(config.target.ip, config.timeout, config.grab_banner);
    let verbose = config.verbose;

    run_scan(
        &prober,
        config.ports.clone(),
        config.concurrency,
        |result: &ProbeResult| {
            if verbose {
                output::print_discovery(result);
            }
        },
    )
}

/// Drain `ports` with up to `concurrency` worker threads.
///
/// `on_open` runs on the worker thread that found the port, before the
/// result is stored. Blocks until every worker has exited.
pub fn run_scan<P, F>(
    prober: &P,
    ports: Vec<Port>,
    concurrency: NonZeroUsize,
    on_open: F,
) -> ResultSet
where
    P: Prober + ?Sized,
    F: Fn(&ProbeResult) + Sync,
{
    let start = Instant::now();
    let queue = WorkQueue::new(ports);
    let results = Mutex::new(Vec::new());
    let workers = concurrency.get().min(MAX_CONCURRENCY).min(queue.len());

    tracing::debug!(
        target_ip = %prober.target(),
        ports = queue.len(),
        workers,
        timeout_ms = prober.timeout().as_millis() as u64,
        "starting scan"
    );

    thread::scope(|s| {
        let mut started = 0;
        for id in 0..workers {
            let (queue, results, on_open) = (&queue, &results, &on_open);
            let spawned = thread::Builder::new()
                .name(format!("worker-{id}"))
                .spawn_scoped(s, move || worker(id, prober, queue, results, on_open));

            match spawned {
                Ok(_) => started += 1,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        started,
                        "could not spawn worker, continuing with fewer"
                    );
                    break;
                }
            }
        }

        // Without any worker thread the caller drains the queue itself.
        if started == 0 && !queue.is_empty() {
            worker(0, prober, &queue, &results, &on_open);
        }
    });

    let results = results.into_inner().unwrap_or_else(PoisonError::into_inner);
    let elapsed = start.elapsed();

    tracing::debug!(
        open = results.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "scan finished"
    );

    ResultSet {
        results,
        ports_scanned: queue.len(),
        elapsed,
    }
}

fn worker<P, F>(
    id: usize,
    prober: &P,
    queue: &WorkQueue,
    results: &Mutex<Vec<ProbeResult>>,
    on_open: &F,
) where
    P: Prober + ?Sized,
    F: Fn(&ProbeResult) + Sync,
{
    let mut probed = 0usize;

    while let Some(port) = queue.claim() {
        probed += 1;
        if let Some(result) = prober.probe(port) {
            on_open(&result);
            results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(result);
        }
    }

    tracing::trace!(worker = id, probed, "worker done");
}
