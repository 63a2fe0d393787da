//! Banner grabbing for open TCP ports.
//!
//! Sends a minimal HTTP request and keeps the first line of whatever comes
//! back. Services that ignore the request simply yield no banner.

use crate::error::BannerError;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

/// Maximum bytes read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Longest banner kept, in characters.
const MAX_BANNER_CHARS: usize = 256;

/// Request sent to elicit a response line.
const HTTP_PROBE: &[u8] = b"HEAD / HTTP/1.0\r\n\r\n";

/// Grab a banner from an already-connected stream.
///
/// Both the write and the single read are bounded by `timeout`.
pub fn grab_banner(stream: &mut TcpStream, timeout: Duration) -> Result<String, BannerError> {
    stream.set_write_timeout(Some(timeout))?;
    stream.set_read_timeout(Some(timeout))?;

    stream.write_all(HTTP_PROBE)?;

    let mut buffer = [0u8; MAX_BANNER_SIZE];
    let n = stream.read(&mut buffer)?;

    first_line(&buffer[..n])
}

/// Keep the first line of a response, decoded, trimmed and capped.
///
/// Only the bytes before the first `\n` are decoded; binary payload after
/// the line (SSH key exchange, TLS records) does not matter.
fn first_line(data: &[u8]) -> Result<String, BannerError> {
    let raw = data.split(|&b| b == b'\n').next().unwrap_or_default();
    let text = std::str::from_utf8(raw)?;
    let line = text.trim();

    if line.is_empty() {
        return Err(BannerError::Empty);
    }

    Ok(line.chars().take(MAX_BANNER_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_first_line() {
        let data = b"HTTP/1.1 200 OK\r\nServer: nginx\r\n\r\n";
        assert_eq!(first_line(data).unwrap(), "HTTP/1.1 200 OK");
    }

    #[test]
    fn test_first_line_trims() {
        assert_eq!(first_line(b"  SSH-2.0-OpenSSH_8.9 \r\n").unwrap(), "SSH-2.0-OpenSSH_8.9");
    }

    #[test]
    fn test_first_line_ignores_binary_tail() {
        let data = b"SSH-2.0-OpenSSH_9.6\r\n\x00\x00\x05\xdc\xff\x14";
        assert_eq!(first_line(data).unwrap(), "SSH-2.0-OpenSSH_9.6");
    }

    #[test]
    fn test_first_line_truncates() {
        let long = "A".repeat(600);
        assert_eq!(first_line(long.as_bytes()).unwrap().len(), MAX_BANNER_CHARS);
    }

    #[test]
    fn test_first_line_rejects_empty_and_binary() {
        assert!(matches!(first_line(b""), Err(BannerError::Empty)));
        assert!(matches!(first_line(b"\r\n"), Err(BannerError::Empty)));
        assert!(matches!(
            first_line(b"\xff\xfe\x00"),
            Err(BannerError::Decode(_))
        ));
    }

    #[test]
    fn test_grab_banner_from_http_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut request = [0u8; 64];
            let _ = conn.read(&mut request).unwrap();
            conn.write_all(b"HTTP/1.0 200 OK\r\nServer: test\r\n\r\n")
                .unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        let banner = grab_banner(&mut stream, Duration::from_secs(2)).unwrap();
        assert_eq!(banner, "HTTP/1.0 200 OK");
        server.join().unwrap();
    }

    #[test]
    fn test_grab_banner_silent_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (conn, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(500));
            drop(conn);
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        let result = grab_banner(&mut stream, Duration::from_millis(100));
        assert!(matches!(result, Err(BannerError::Io(_))));
        server.join().unwrap();
    }
}
