//! Best-effort discovery of the host's LAN-facing address, for people who
//! want to point a phone at the relay during development.

use crate::{Error, Result};
use std::{
    env, fmt, io,
    net::{IpAddr, Ipv4Addr, ToSocketAddrs, UdpSocket},
    process::Command,
};
use tracing::debug;

pub const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Public address used only to pick a route. Nothing is sent to it.
pub const ROUTE_PROBE_TARGET: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 80);

/// The local address the OS would use to reach the internet, or `127.0.0.1`
/// when there is no route.
pub fn local_ip() -> IpAddr {
    local_ip_via(ROUTE_PROBE_TARGET)
}

/// Like [`local_ip`], probing the route towards `target` instead.
pub fn local_ip_via(target: impl ToSocketAddrs) -> IpAddr {
    match probe_route(target) {
        Ok(ip) if !ip.is_unspecified() => ip,
        Ok(ip) => {
            debug!("Route probe returned unspecified address {}", ip);
            LOOPBACK
        }
        Err(e) => {
            debug!("Route probe failed: {}", e);
            LOOPBACK
        }
    }
}

// Connecting a UDP socket only selects a route; no datagram leaves the host.
fn probe_route(target: impl ToSocketAddrs) -> io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}

/// Commands tried in order to list network interfaces on this platform.
pub fn listing_commands() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "windows") {
        &[("ipconfig", &[])]
    } else {
        &[("ifconfig", &[]), ("ip", &["addr"])]
    }
}

/// Raw stdout of the first interface-listing command that could be started.
/// The text is whatever the system tool prints and is not parsed.
pub fn interface_listing() -> Result<String> {
    let mut failures = Vec::new();

    for (program, args) in listing_commands() {
        match Command::new(program).args(*args).output() {
            Ok(output) => {
                debug!("`{}` exited with {}", program, output.status);
                return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
            }
            Err(e) => {
                debug!("Could not run `{}`: {}", program, e);
                failures.push(format!("{program}: {e}"));
            }
        }
    }

    Err(Error::command(format!(
        "No interface listing command available ({})",
        failures.join("; ")
    )))
}

pub fn hostname() -> String {
    let from_command = Command::new("hostname")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|name| !name.is_empty());

    from_command
        .or_else(|| env::var("HOSTNAME").ok())
        .or_else(|| env::var("COMPUTERNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// The first `max_chars` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, Clone)]
pub struct NetworkReport {
    pub hostname: String,
    pub local_ip: IpAddr,
    pub lan_port: u16,
    /// Truncated interface listing, or why it could not be produced.
    pub interfaces: std::result::Result<String, String>,
}

impl NetworkReport {
    pub fn collect(lan_port: u16, max_chars: usize) -> Self {
        let interfaces = interface_listing()
            .map(|listing| truncate_chars(&listing, max_chars).to_string())
            .map_err(|e| e.detail());

        Self {
            hostname: hostname(),
            local_ip: local_ip(),
            lan_port,
            interfaces,
        }
    }

    pub fn lan_url(&self) -> String {
        format!("http://{}:{}", self.local_ip, self.lan_port)
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Network information ===")?;
        writeln!(f, "Hostname: {}", self.hostname)?;
        writeln!(f, "Local IP: {}", self.local_ip)?;
        writeln!(f, "Loopback: {}", LOOPBACK)?;
        writeln!(f)?;
        writeln!(f, "Others on the LAN can reach you at:")?;
        writeln!(f, "  {}", self.lan_url())?;
        writeln!(f)?;
        writeln!(f, "Interface details:")?;
        match &self.interfaces {
            Ok(listing) => write!(f, "{}", listing),
            Err(reason) => write!(f, "(unavailable: {})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_local_ip_never_unspecified() {
        let ip = local_ip();
        assert!(!ip.is_unspecified());
    }

    #[test]
    fn test_unroutable_target_falls_back_to_loopback() {
        // An IPv4 socket cannot connect to an IPv6 destination.
        assert_eq!(local_ip_via("[::1]:80"), LOOPBACK);
    }

    #[test]
    fn test_unresolvable_target_falls_back_to_loopback() {
        assert_eq!(local_ip_via("not a socket address"), LOOPBACK);
    }

    #[rstest]
    #[case("hello", 10, "hello")]
    #[case("hello", 3, "hel")]
    #[case("hello", 0, "")]
    #[case("康康1号机", 2, "康康")]
    #[case("", 500, "")]
    fn test_truncate_chars(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(truncate_chars(text, max), expected);
    }

    #[test]
    fn test_listing_commands_for_platform() {
        let commands = listing_commands();
        assert!(!commands.is_empty());
        if cfg!(target_os = "windows") {
            assert_eq!(commands[0].0, "ipconfig");
        } else {
            assert_eq!(commands[0].0, "ifconfig");
        }
    }

    #[test]
    fn test_report_rendering() {
        let report = NetworkReport {
            hostname: "devbox".to_string(),
            local_ip: "192.168.1.23".parse().unwrap(),
            lan_port: 3000,
            interfaces: Ok("eth0: flags=4163<UP>".to_string()),
        };

        assert_eq!(report.lan_url(), "http://192.168.1.23:3000");

        let rendered = report.to_string();
        assert!(rendered.contains("Hostname: devbox"));
        assert!(rendered.contains("Local IP: 192.168.1.23"));
        assert!(rendered.contains("Loopback: 127.0.0.1"));
        assert!(rendered.contains("  http://192.168.1.23:3000"));
        assert!(rendered.ends_with("eth0: flags=4163<UP>"));
    }

    #[test]
    fn test_report_rendering_without_listing() {
        let report = NetworkReport {
            hostname: "devbox".to_string(),
            local_ip: LOOPBACK,
            lan_port: 3000,
            interfaces: Err("no tools".to_string()),
        };

        assert!(report.to_string().ends_with("(unavailable: no tools)"));
    }

    #[test]
    fn test_hostname_is_never_empty() {
        assert!(!hostname().is_empty());
    }
}
