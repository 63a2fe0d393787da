//! Target resolution.
//!
//! A scan covers exactly one host. Literal addresses are used as-is;
//! hostnames are validated and resolved once before any probe runs.

use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::Resolver;

/// A scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Error type for target parsing and resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target format: '{0}'")]
    InvalidFormat(String),
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

/// Resolve an operator-supplied host into a single scan target.
pub fn resolve(host: &str) -> Result<ScanTarget, TargetError> {
    let host = host.trim();

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ScanTarget::new(host, ip));
    }

    if !is_valid_hostname(host) {
        return Err(TargetError::InvalidFormat(host.to_string()));
    }

    let resolver = system_resolver()
        .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

    let response = resolver
        .lookup_ip(host)
        .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

    let ip = response
        .iter()
        .next()
        .ok_or_else(|| TargetError::NoAddressesFound(host.to_string()))?;

    tracing::debug!(host, %ip, "resolved target");
    Ok(ScanTarget::new(host, ip))
}

/// Build a resolver from the host's resolv.conf, so internal zones and
/// search domains work. Falls back to public upstreams if that file is
/// missing or unreadable.
fn system_resolver() -> std::io::Result<Resolver> {
    Resolver::from_system_conf().or_else(|e| {
        tracing::debug!(error = %e, "no usable system resolver config, using defaults");
        Resolver::new(ResolverConfig::default(), ResolverOpts::default())
    })
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.trim_end_matches('.').split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Must start and end with alphanumeric
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}
