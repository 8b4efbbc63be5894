//! ip6walk Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod errors;
pub mod nibble_path;
pub mod probe;
pub mod result_map;

pub use config::{CliOverrides, Config, ConfigError, LogFormat, TimeoutPolicy, WalkConfig};
pub use dns_protocol::DnsProtocol;
pub use errors::DomainError;
pub use nibble_path::{NibblePath, MAX_DEPTH, REVERSE_ZONE};
pub use probe::{ProbeResult, PtrLookup};
pub use result_map::ResultMap;
