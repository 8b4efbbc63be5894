use ip6walk_domain::{NibblePath, ProbeResult};

/// Receives one call per classified probe when verbose mode is on.
///
/// Called from the walk coordinator only, so calls never overlap.
pub trait ProbeReporter: Send + Sync {
    fn report(&self, path: &NibblePath, result: &ProbeResult);
}

/// Reporter that drops everything.
pub struct SilentProbeReporter;

impl ProbeReporter for SilentProbeReporter {
    fn report(&self, _path: &NibblePath, _result: &ProbeResult) {}
}
