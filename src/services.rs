//! Service names for well-known ports.
//!
//! This is a static lookup only; nothing here inspects traffic.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Name reported for ports missing from the table.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (20, "FTP-Data"),
        (21, "FTP"),
        (22, "SSH"),
        (23, "Telnet"),
        (25, "SMTP"),
        (53, "DNS"),
        (69, "TFTP"),
        (80, "HTTP"),
        (88, "Kerberos"),
        (110, "POP3"),
        (111, "RPCBind"),
        (119, "NNTP"),
        (123, "NTP"),
        (135, "MSRPC"),
        (139, "NetBIOS"),
        (143, "IMAP"),
        (161, "SNMP"),
        (179, "BGP"),
        (389, "LDAP"),
        (443, "HTTPS"),
        (445, "SMB"),
        (465, "SMTPS"),
        (514, "Syslog"),
        (587, "Submission"),
        (631, "IPP"),
        (636, "LDAPS"),
        (873, "Rsync"),
        (993, "IMAPS"),
        (995, "POP3S"),
        (1080, "SOCKS"),
        (1433, "MSSQL"),
        (1521, "Oracle"),
        (1723, "PPTP"),
        (2049, "NFS"),
        (3306, "MySQL"),
        (3389, "RDP"),
        (5432, "PostgreSQL"),
        (5900, "VNC"),
        (6379, "Redis"),
        (8080, "HTTP-Proxy"),
        (8443, "HTTPS-Alt"),
        (9200, "Elasticsearch"),
        (11211, "Memcached"),
        (27017, "MongoDB"),
    ])
});

/// Look up the service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn get_service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Service name for a port, falling back to [`UNKNOWN_SERVICE`].
pub fn service_name(port: u16) -> &'static str {
    get_service_name(port).unwrap_or(UNKNOWN_SERVICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ports() {
        assert_eq!(get_service_name(22), Some("SSH"));
        assert_eq!(get_service_name(80), Some("HTTP"));
        assert_eq!(get_service_name(443), Some("HTTPS"));
        assert_eq!(get_service_name(3306), Some("MySQL"));
    }

    #[test]
    fn test_default_ports_are_named() {
        for port in crate::types::build_ports(crate::types::DEFAULT_PORTS).unwrap() {
            assert!(get_service_name(port).is_some(), "port {port} has no name");
        }
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(get_service_name(12345), None);
        assert_eq!(service_name(12345), "unknown");
    }
}
