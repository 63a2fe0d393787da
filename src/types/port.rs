//! Port types with validation and parsing.
//!
//! The `Port` newtype keeps values inside the valid TCP port domain (1-65535).
//! `PortRange` and `PortSpec` turn operator input such as `22,80,8000-8010`
//! into the ordered list of ports the scan engine works through.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Ports probed when the operator gives no specification.
pub const DEFAULT_PORTS: &str = "21,22,23,25,53,80,110,139,143,443,445,3306,3389";

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None for port 0.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| PortError::OutOfRange(value.to_string()))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port specification parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(String),
    #[error("invalid port number: '{0}'")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// A range of ports (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

/// A complete port specification made of singles and ranges.
///
/// Supports formats like:
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "1-1000"
/// - Mixed: "22,80,443,8000-9000"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Expand into a deduplicated port list in first-seen order.
    ///
    /// Order matters for scheduling: workers claim ports front to back, so
    /// the operator's ordering is the order in which probes start.
    pub fn to_ports(&self) -> Vec<Port> {
        let mut seen = HashSet::new();
        self.ranges
            .iter()
            .flat_map(PortRange::iter)
            .filter(|port| seen.insert(*port))
            .collect()
    }
}

/// Expand a port specification string into raw port numbers.
pub fn build(spec: &str) -> Result<Vec<u16>, PortError> {
    let spec: PortSpec = spec.parse()?;
    Ok(spec.to_ports().into_iter().map(Port::as_u16).collect())
}

fn parse_bound(raw: &str) -> Result<Port, PortError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PortError::InvalidFormat(raw.to_string()));
    }
    // All digits: a parse failure can only mean the value overflowed u16.
    let value: u16 = raw
        .parse()
        .map_err(|_| PortError::OutOfRange(raw.to_string()))?;
    Port::try_from(value)
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            match part.split_once('-') {
                Some((start, end)) => {
                    if end.contains('-') {
                        return Err(PortError::InvalidFormat(part.to_string()));
                    }
                    let range = PortRange::new(parse_bound(start)?, parse_bound(end)?)?;
                    ranges.push(range);
                }
                None => ranges.push(PortRange::single(parse_bound(part)?)),
            }
        }

        Ok(Self { ranges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_build_single() {
        assert_eq!(build("80").unwrap(), vec![80]);
        assert_eq!(build("65535").unwrap(), vec![65535]);
    }

    #[test]
    fn test_build_range() {
        assert_eq!(build("1-5").unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(build("7-7").unwrap(), vec![7]);
    }

    #[test]
    fn test_build_list() {
        assert_eq!(build("80,443").unwrap(), vec![80, 443]);
        assert_eq!(build(" 22 , 80 ").unwrap(), vec![22, 80]);
    }

    #[test]
    fn test_build_preserves_first_seen_order() {
        assert_eq!(build("443,80,443,20-22,21").unwrap(), vec![443, 80, 20, 21, 22]);
    }

    #[test]
    fn test_build_rejects_out_of_range() {
        assert!(matches!(build("0-5"), Err(PortError::OutOfRange(_))));
        assert!(matches!(build("0"), Err(PortError::OutOfRange(_))));
        assert!(matches!(build("70000"), Err(PortError::OutOfRange(_))));
        assert!(matches!(build("1-70000"), Err(PortError::OutOfRange(_))));
    }

    #[test]
    fn test_build_rejects_malformed() {
        assert!(matches!(build("abc"), Err(PortError::InvalidFormat(_))));
        assert!(matches!(build("80,"), Err(PortError::InvalidFormat(_))));
        assert!(matches!(build("1-2-3"), Err(PortError::InvalidFormat(_))));
        assert!(matches!(build("-5"), Err(PortError::InvalidFormat(_))));
        assert!(matches!(build("+80"), Err(PortError::InvalidFormat(_))));
        assert_eq!(build("100-50"), Err(PortError::InvalidRange(100, 50)));
        assert_eq!(build("  "), Err(PortError::Empty));
    }

    #[test]
    fn test_default_ports() {
        let ports = build(DEFAULT_PORTS).unwrap();
        assert_eq!(ports.len(), 13);
        assert_eq!(ports[0], 21);
        assert_eq!(ports[12], 3389);
    }

    #[test]
    fn test_spec_to_ports() {
        let spec: PortSpec = "22,80-82,81".parse().unwrap();
        let ports: Vec<u16> = spec.to_ports().into_iter().map(Port::as_u16).collect();
        assert_eq!(ports, vec![22, 80, 81, 82]);
    }
}
