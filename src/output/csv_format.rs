//! CSV result files.

use crate::error::OutputError;
use crate::scanner::ResultSet;

/// Render results as CSV with a `port,service,banner` header.
pub fn render_csv(results: &ResultSet) -> Result<String, OutputError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(["port", "service", "banner"])?;

    for result in results.sorted() {
        wtr.write_record([
            result.port.to_string().as_str(),
            result.service.as_str(),
            result.banner.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{run_scan, ProbeResult, Prober};
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};
    use std::num::NonZeroUsize;
    use std::time::Duration;

    struct BannerEverywhere;

    impl Prober for BannerEverywhere {
        fn probe(&self, port: Port) -> Option<ProbeResult> {
            Some(ProbeResult::open(port).with_banner(Some("220 mail, ready".to_string())))
        }

        fn target(&self) -> IpAddr {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(10)
        }
    }

    #[test]
    fn test_render_csv() {
        let ports = [25, 21].iter().filter_map(|&p| Port::new(p)).collect();
        let results = run_scan(&BannerEverywhere, ports, NonZeroUsize::MIN, |_| {});

        let csv = render_csv(&results).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "port,service,banner");
        assert_eq!(lines[1], "21,FTP,\"220 mail, ready\"");
        assert_eq!(lines[2], "25,SMTP,\"220 mail, ready\"");
    }
}
