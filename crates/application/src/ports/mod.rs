mod probe_reporter;
mod ptr_resolver;

pub use probe_reporter::{ProbeReporter, SilentProbeReporter};
pub use ptr_resolver::PtrResolver;

// Re-export for convenience
pub use ip6walk_domain::{ProbeResult, PtrLookup};
