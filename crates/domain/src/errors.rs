use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid IPv6 address: {0}")]
    InvalidAddress(String),

    #[error("Unsupported prefix size /{0}, must be on a 4-bit boundary in the range /0../124")]
    UnalignedSize(i64),

    #[error("Prefix missing subnet size")]
    MissingSize,

    #[error("Nibble path has {0} nibbles, a full address needs 32")]
    IncompletePath(usize),

    #[error("Invalid resolver endpoint: {0}")]
    InvalidResolver(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Upstream {server} answered {rcode}")]
    UpstreamRcode { server: String, rcode: String },

    #[error("No resolvers configured")]
    TransportNoServers,

    #[error("{path} Timeout")]
    WalkTimeout { path: String },

    #[error("Query for {path} failed: {source}")]
    ProbeFailed {
        path: String,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// True for the validation errors raised before any query is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress(_)
                | Self::UnalignedSize(_)
                | Self::MissingSize
                | Self::IncompletePath(_)
                | Self::InvalidResolver(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::QueryTimeout | Self::TransportTimeout { .. })
    }
}
