//! TCP connect prober.
//!
//! Performs standard TCP connect probes through the operating system's
//! socket API. Needs no privileges, but completes the full handshake, so
//! every probe is visible to the target.

use crate::banner::grab_banner;
use crate::error::ProbeError;
use crate::scanner::traits::{ProbeResult, Prober};
use crate::types::Port;
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::Duration;

/// TCP connect prober for a single target.
#[derive(Debug, Clone)]
pub struct TcpProber {
    target: IpAddr,
    timeout: Duration,
    grab_banners: bool,
}

impl TcpProber {
    /// Create a new TCP connect prober.
    ///
    /// # Arguments
    /// * `target` - Target IP address to probe
    /// * `timeout` - Connect deadline, also used to bound the banner read
    /// * `grab_banners` - Whether to attempt banner grabbing on open ports
    pub fn new(target: IpAddr, timeout: Duration, grab_banners: bool) -> Self {
        Self {
            target,
            timeout,
            grab_banners,
        }
    }

    /// Attempt to connect to the target address.
    fn attempt_connect(&self, addr: SocketAddr) -> Result<TcpStream, ProbeError> {
        Ok(TcpStream::connect_timeout(&addr, self.timeout)?)
    }
}

impl Prober for TcpProber {
    fn probe(&self, port: Port) -> Option<ProbeResult> {
        let addr = SocketAddr::new(self.target, port.as_u16());

        let mut stream = match self.attempt_connect(addr) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::trace!(%addr, reason = %e, "port closed or filtered");
                return None;
            }
        };

        let banner = if self.grab_banners {
            grab_banner(&mut stream, self.timeout)
                .inspect_err(|e| tracing::trace!(%addr, reason = %e, "no banner"))
                .ok()
        } else {
            None
        };

        Some(ProbeResult::open(port).with_banner(banner))
    }

    fn target(&self) -> IpAddr {
        self.target
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
