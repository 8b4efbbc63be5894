use crate::errors::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// A resolver endpoint and the transport used to reach it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp { addr: SocketAddr },
    Tcp { addr: SocketAddr },
}

impl DnsProtocol {
    pub fn udp(ip: IpAddr) -> Self {
        DnsProtocol::Udp {
            addr: SocketAddr::new(ip, DEFAULT_DNS_PORT),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        match self {
            DnsProtocol::Udp { addr } | DnsProtocol::Tcp { addr } => *addr,
        }
    }
}

/// `IP`, `IP:PORT` or `[IPv6]:PORT`; a bare address gets port 53.
fn parse_endpoint(s: &str) -> Option<SocketAddr> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Some(addr);
    }
    let bare = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

impl FromStr for DnsProtocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(addr_str) = s.strip_prefix("udp://") {
            let addr = parse_endpoint(addr_str).ok_or_else(|| {
                DomainError::InvalidResolver(format!("Invalid UDP address '{}'", addr_str))
            })?;
            return Ok(DnsProtocol::Udp { addr });
        }
        if let Some(addr_str) = s.strip_prefix("tcp://") {
            let addr = parse_endpoint(addr_str).ok_or_else(|| {
                DomainError::InvalidResolver(format!("Invalid TCP address '{}'", addr_str))
            })?;
            return Ok(DnsProtocol::Tcp { addr });
        }
        if let Some(addr) = parse_endpoint(s) {
            return Ok(DnsProtocol::Udp { addr });
        }
        Err(DomainError::InvalidResolver(format!(
            "'{}'. Expected: IP, IP:PORT, [IPv6]:PORT, udp://IP:PORT or tcp://IP:PORT",
            s
        )))
    }
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsProtocol::Udp { addr } => write!(f, "udp://{}", addr),
            DnsProtocol::Tcp { addr } => write!(f, "tcp://{}", addr),
        }
    }
}
