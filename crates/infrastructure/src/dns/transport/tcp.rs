//! TCP Transport for DNS queries (RFC 1035 §4.2.2, RFC 7766)
//!
//! Each message is prefixed with its length as a big-endian u16. One
//! connection per query; the walker only falls back to TCP on truncation.

use super::udp::validate_response_id;
use super::TransportResponse;
use ip6walk_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
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

        let mut stream = tokio::time::timeout_at(deadline, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("failed to connect", e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| self.io_error("failed to set TCP_NODELAY", e))?;

        tokio::time::timeout_at(deadline, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error("failed to send TCP query", e))?;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response_bytes =
            tokio::time::timeout_at(deadline, read_with_length_prefix(&mut stream))
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| self.io_error("failed to read TCP response", e))?;

        validate_response_id(message_bytes, &response_bytes, self.server_addr)?;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "DNS message over 65535 bytes"))?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let mut response = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
