//! Prober trait abstraction.
//!
//! The scan engine only knows how to hand ports to something that can
//! probe them. Keeping that seam as a trait lets the engine be exercised
//! against scripted probers as well as real sockets.

use crate::services;
use crate::types::Port;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// An open port discovered by a probe.
///
/// Closed and filtered ports never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The port that accepted the connection.
    pub port: Port,
    /// Always `true`; kept so serialized reports are self-describing.
    pub open: bool,
    /// Service name from the well-known table, or "unknown".
    pub service: String,
    /// First line the service sent back, if banner grabbing found one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl ProbeResult {
    /// Record an open port, naming its service from the static table.
    pub fn open(port: Port) -> Self {
        Self {
            port,
            open: true,
            service: services::service_name(port.as_u16()).to_string(),
            banner: None,
        }
    }

    /// Set the banner.
    pub fn with_banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }
}

/// Trait for single-port probe implementations.
///
/// Implementations are shared by every worker thread, so they must be
/// `Sync` and keep no per-probe state of their own.
pub trait Prober: Send + Sync {
    /// Probe one port. `None` means closed or filtered.
    fn probe(&self, port: Port) -> Option<ProbeResult>;

    /// Get the target IP address.
    fn target(&self) -> IpAddr;

    /// Get the per-probe timeout.
    fn timeout(&self) -> Duration;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_result_names_service() {
        let result = ProbeResult::open(Port::new(80).unwrap());
        assert!(result.open);
        assert_eq!(result.service, "HTTP");
        assert_eq!(result.banner, None);

        let result = ProbeResult::open(Port::new(40000).unwrap());
        assert_eq!(result.service, "unknown");
    }

    #[test]
    fn test_with_banner() {
        let result = ProbeResult::open(Port::new(22).unwrap())
            .with_banner(Some("SSH-2.0-OpenSSH_9.6".to_string()));
        assert_eq!(result.banner.as_deref(), Some("SSH-2.0-OpenSSH_9.6"));
    }
}
