//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). A truncated (TC) response is
//! returned to the caller, which decides whether to retry over TCP.

use super::TransportResponse;
use ip6walk_domain::DomainError;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Largest payload a client may advertise via EDNS(0).
const MAX_UDP_RESPONSE_SIZE: usize = 65_535;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn io_error(&self, action: &str, e: io::Error) -> DomainError {
        if e.kind() == io::ErrorKind::ConnectionRefused {
            return DomainError::TransportConnectionRefused {
                server: self.server_addr.to_string(),
            };
        }
        DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", action, e),
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let deadline = Instant::now() + timeout;

        // Ephemeral port; connect() makes the kernel drop datagrams from other peers.
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.io_error("failed to bind UDP socket", e))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.io_error("failed to connect UDP socket", e))?;

        let bytes_sent = tokio::time::timeout_at(deadline, socket.send(message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("failed to send UDP query", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let bytes_received = tokio::time::timeout_at(deadline, socket.recv(&mut recv_buf))
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| self.io_error("failed to receive UDP response", e))?;

            let response = &recv_buf[..bytes_received];
            if let Err(e) = validate_response_id(message_bytes, response, self.server_addr) {
                warn!(server = %self.server_addr, error = %e, "Discarding stray UDP response");
                continue;
            }

            debug!(
                server = %self.server_addr,
                bytes_received = bytes_received,
                "UDP response received"
            );

            return Ok(TransportResponse {
                bytes: response.to_vec(),
                protocol_used: "UDP",
            });
        }
    }
}

/// A response must echo the query's ID (first two bytes of the header).
pub fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    let (Some(query_id), Some(response_id)) = (query.get(..2), response.get(..2)) else {
        return Err(DomainError::InvalidDnsResponse(format!(
            "message exchanged with {} too short to carry an ID",
            server
        )));
    };
    if query_id != response_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "ID mismatch from {}: expected {:02x}{:02x}, got {:02x}{:02x}",
            server, query_id[0], query_id[1], response_id[0], response_id[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod udp_test;
