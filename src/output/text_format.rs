//! Plain text result files.
//!
//! ```text
//! Scan results for example.com (93.184.216.34)
//! ==================================================
//! Port 22 (SSH) open
//!     Banner: SSH-2.0-OpenSSH_9.6
//!
//! Port 80 (HTTP) open
//!
//! ```

use crate::scanner::ResultSet;
use crate::types::ScanTarget;
use std::fmt::Write;

const SEPARATOR_WIDTH: usize = 50;

/// Render results as the plain text file format, sorted by port.
pub fn render_text(results: &ResultSet, target: &ScanTarget) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Scan results for {target}");
    let _ = writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH));

    for result in results.sorted() {
        let _ = writeln!(out, "Port {} ({}) open", result.port, result.service);
        if let Some(banner) = &result.banner {
            let _ = writeln!(out, "    Banner: {banner}");
        }
        out.push('\n');
    }

    out
}

/// Parse a text result file back into (port, service) pairs.
///
/// Lines that are not port entries are ignored.
pub fn read_text_report(content: &str) -> Vec<(u16, String)> {
    content.lines().filter_map(parse_entry).collect()
}

fn parse_entry(line: &str) -> Option<(u16, String)> {
    let rest = line.strip_prefix("Port ")?;
    let (port, rest) = rest.split_once(' ')?;
    let service = rest.strip_prefix('(')?.strip_suffix(") open")?;
    Some((port.parse().ok()?, service.to_string()))
}
