use ip6walk_application::ports::ProbeReporter;
use ip6walk_domain::{NibblePath, ProbeResult};

/// Verbose per-probe diagnostics on stderr: `<hex path> <classification>`.
pub struct StderrProbeReporter;

impl ProbeReporter for StderrProbeReporter {
    fn report(&self, path: &NibblePath, result: &ProbeResult) {
        eprintln!("{}", format_report(path, result));
    }
}

fn format_report(path: &NibblePath, result: &ProbeResult) -> String {
    format!("{} {}", path.to_hex_string(), result)
}
