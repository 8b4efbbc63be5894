use async_trait::async_trait;
use ip6walk_domain::{DomainError, PtrLookup};

/// DNS client used by the walker for PTR queries.
///
/// Implementations report a per-query timeout as `DomainError::QueryTimeout`
/// (or `TransportTimeout`); every other error is treated as a broken
/// transport and ends the walk.
#[async_trait]
pub trait PtrResolver: Send + Sync {
    async fn lookup_ptr(&self, name: &str) -> Result<PtrLookup, DomainError>;
}
