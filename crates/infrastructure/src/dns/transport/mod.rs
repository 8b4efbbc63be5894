//! Wire transports for a single query/response exchange with one resolver.

pub mod tcp;
pub mod udp;

use ip6walk_domain::{DnsProtocol, DomainError};
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// The transport a resolver endpoint is reached over first.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn for_protocol(protocol: &DnsProtocol) -> Self {
        match protocol {
            DnsProtocol::Udp { addr } => Self::Udp(udp::UdpTransport::new(*addr)),
            DnsProtocol::Tcp { addr } => Self::Tcp(tcp::TcpTransport::new(*addr)),
        }
    }

    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => t.send(message_bytes, timeout).await,
            Self::Tcp(t) => t.send(message_bytes, timeout).await,
        }
    }
}
