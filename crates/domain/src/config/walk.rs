use crate::dns_protocol::DnsProtocol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a probe timeout does to the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutPolicy {
    /// Stop the whole walk and report failure.
    #[default]
    Abort,
    /// Prune the timed-out branch and continue with its siblings.
    Skip,
}

impl TimeoutPolicy {
    pub fn from_ignore_flag(ignore_timeout: bool) -> Self {
        if ignore_timeout {
            Self::Skip
        } else {
            Self::Abort
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

/// `[walk]` section of the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalkSettings {
    /// Resolver endpoints; empty means "use the system resolvers".
    #[serde(default)]
    pub resolvers: Vec<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub ignore_timeout: bool,

    #[serde(default)]
    pub verbose: bool,

    /// Upper bound on queries in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Advertised EDNS(0) UDP payload size; 0 sends plain queries.
    #[serde(default = "default_edns_payload")]
    pub edns_payload: u16,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            resolvers: Vec::new(),
            timeout_ms: default_timeout_ms(),
            ignore_timeout: false,
            verbose: false,
            concurrency: default_concurrency(),
            edns_payload: default_edns_payload(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_concurrency() -> usize {
    16
}

fn default_edns_payload() -> u16 {
    4096
}

/// Settings for one walk, fixed before the first query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    pub resolvers: Vec<DnsProtocol>,
    pub query_timeout: Duration,
    pub timeout_policy: TimeoutPolicy,
    pub verbose: bool,
    pub concurrency: usize,
    pub edns_payload: Option<u16>,
}

impl WalkConfig {
    pub fn new(resolvers: Vec<DnsProtocol>) -> Self {
        Self {
            resolvers,
            query_timeout: Duration::from_millis(default_timeout_ms()),
            timeout_policy: TimeoutPolicy::Abort,
            verbose: false,
            concurrency: default_concurrency(),
            edns_payload: Some(default_edns_payload()),
        }
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_edns_payload(mut self, payload: Option<u16>) -> Self {
        self.edns_payload = payload;
        self
    }
}
