//! Static work list shared by the worker pool.

use crate::types::Port;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed list of ports handed out one at a time.
///
/// The list is complete before any worker starts and never grows. Each
/// claim advances a single atomic cursor, so every port is handed to
/// exactly one worker.
#[derive(Debug)]
pub struct WorkQueue {
    ports: Vec<Port>,
    cursor: AtomicUsize,
}

impl WorkQueue {
    /// Create a queue over `ports`, front to back.
    pub fn new(ports: Vec<Port>) -> Self {
        Self {
            ports,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Claim the next unprobed port, or `None` once the list is drained.
    pub fn claim(&self) -> Option<Port> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.ports.get(index).copied()
    }

    /// Total number of ports in the list.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Check if the list was empty to begin with.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}
