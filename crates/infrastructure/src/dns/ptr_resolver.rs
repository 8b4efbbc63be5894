use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{Transport, TransportResponse};
use async_trait::async_trait;
use ip6walk_application::ports::PtrResolver;
use ip6walk_domain::{DnsProtocol, DomainError, PtrLookup, WalkConfig};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Leaves the TCP retry at least this much time even when UDP used up the
/// query budget.
const MIN_TCP_RETRY_BUDGET: Duration = Duration::from_millis(500);

/// `PtrResolver` over plain DNS: UDP first, TCP on truncation, resolvers
/// tried in order until one gives a usable answer.
pub struct HickoryPtrResolver {
    servers: Vec<DnsProtocol>,
    timeout: Duration,
    edns_payload: Option<u16>,
}

impl HickoryPtrResolver {
    pub fn new(servers: Vec<DnsProtocol>, timeout: Duration) -> Self {
        Self {
            servers,
            timeout,
            edns_payload: None,
        }
    }

    pub fn with_edns_payload(mut self, edns_payload: Option<u16>) -> Self {
        self.edns_payload = edns_payload;
        self
    }

    pub fn from_walk_config(config: &WalkConfig) -> Self {
        Self::new(config.resolvers.clone(), config.query_timeout)
            .with_edns_payload(config.edns_payload)
    }

    pub fn servers(&self) -> &[DnsProtocol] {
        &self.servers
    }

    async fn query_server(
        &self,
        protocol: &DnsProtocol,
        query_bytes: &[u8],
    ) -> Result<PtrLookup, DomainError> {
        let start = Instant::now();
        let server = protocol.socket_addr().to_string();

        let response = Transport::for_protocol(protocol)
            .send(query_bytes, self.timeout)
            .await?;
        let mut parsed = ResponseParser::parse(&response.bytes)?;
        let mut protocol_used = response.protocol_used;

        if parsed.truncated {
            if let DnsProtocol::Udp { addr } = protocol {
                debug!(server = %addr, "Response truncated (TC bit), retrying via TCP");

                let remaining = self
                    .timeout
                    .checked_sub(start.elapsed())
                    .unwrap_or_default()
                    .max(MIN_TCP_RETRY_BUDGET);
                let tcp = Transport::for_protocol(&DnsProtocol::Tcp { addr: *addr });
                let TransportResponse { bytes, protocol_used: used } =
                    tcp.send(query_bytes, remaining).await?;
                parsed = ResponseParser::parse(&bytes)?;
                protocol_used = used;
            }
        }

        debug!(
            server = %server,
            protocol = protocol_used,
            latency_ms = start.elapsed().as_millis() as u64,
            "Server responded"
        );

        parsed.into_lookup(&server)
    }
}

#[async_trait]
impl PtrResolver for HickoryPtrResolver {
    async fn lookup_ptr(&self, name: &str) -> Result<PtrLookup, DomainError> {
        if self.servers.is_empty() {
            return Err(DomainError::TransportNoServers);
        }

        let query_bytes = MessageBuilder::build_ptr_query(name, self.edns_payload)?;
        let mut last_error: Option<DomainError> = None;

        for (index, protocol) in self.servers.iter().enumerate() {
            match self.query_server(protocol, &query_bytes).await {
                Ok(lookup) => return Ok(lookup),
                Err(e) if e.is_timeout() => {
                    debug!(protocol = %protocol, name = %name, position = index, "Server timed out");
                }
                Err(e) => {
                    warn!(protocol = %protocol, name = %name, error = %e, position = index, "Failing over");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(DomainError::QueryTimeout))
    }
}
