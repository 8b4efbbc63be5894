//! Nameserver discovery from `resolv.conf(5)`.

use ip6walk_domain::DnsProtocol;
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, warn};

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Port-53 UDP endpoints for every usable `nameserver` line, in file order.
///
/// Scoped IPv6 addresses (`fe80::1%eth0`) and unparsable entries are
/// skipped.
pub fn nameservers(contents: &str) -> Vec<DnsProtocol> {
    let mut servers = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let mut parts = line.split_whitespace();
        if parts.next() != Some("nameserver") {
            continue;
        }
        let Some(value) = parts.next() else {
            continue;
        };

        match value.parse::<IpAddr>() {
            Ok(ip) => {
                let server = DnsProtocol::udp(ip);
                if !servers.contains(&server) {
                    servers.push(server);
                }
            }
            Err(_) => debug!(entry = %value, "Skipping unusable nameserver entry"),
        }
    }

    servers
}

/// Nameservers of the given `resolv.conf`; empty when it cannot be read.
pub fn resolvers_from_file(path: &Path) -> Vec<DnsProtocol> {
    match std::fs::read_to_string(path) {
        Ok(contents) => nameservers(&contents),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read resolver configuration");
            Vec::new()
        }
    }
}

pub fn system_resolvers() -> Vec<DnsProtocol> {
    resolvers_from_file(Path::new(RESOLV_CONF_PATH))
}
