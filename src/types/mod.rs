//! Core type definitions using newtype patterns for type safety.
//!
//! These types keep invalid ports and unresolved targets out of the scan
//! engine entirely.

mod port;
mod target;

pub use port::{build as build_ports, Port, PortError, PortRange, PortSpec, DEFAULT_PORTS};
pub use target::{resolve, ScanTarget, TargetError};
