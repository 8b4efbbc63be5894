use crate::ports::{ProbeReporter, PtrResolver, SilentProbeReporter};
use crate::services::ResponseClassifier;
use ip6walk_domain::{
    DomainError, NibblePath, ProbeResult, PtrLookup, ResultMap, TimeoutPolicy, WalkConfig,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

type ProbeOutcome = (NibblePath, Result<PtrLookup, DomainError>);

/// Walks the `ip6.arpa` tree below a prefix and collects every PTR leaf.
///
/// Probes run as tasks, at most `WalkConfig::concurrency` alive at once. This
/// task alone classifies outcomes, owns the result map and the stack of
/// paths still to probe. The stack is popped depth-first, so it never holds
/// more than 16 paths per level below the prefix.
pub struct WalkPrefixUseCase {
    resolver: Arc<dyn PtrResolver>,
    reporter: Arc<dyn ProbeReporter>,
}

impl WalkPrefixUseCase {
    pub fn new(resolver: Arc<dyn PtrResolver>) -> Self {
        Self {
            resolver,
            reporter: Arc::new(SilentProbeReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ProbeReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[instrument(skip(self, prefix, config), fields(prefix = %prefix.to_hex_string(), depth = prefix.depth()))]
    pub async fn execute(
        &self,
        prefix: &NibblePath,
        config: &WalkConfig,
    ) -> Result<ResultMap, DomainError> {
        let start = Instant::now();
        let mut results = ResultMap::new();

        if prefix.is_leaf() {
            debug!("Prefix is already a full address, nothing to walk");
            return Ok(results);
        }

        let limit = config.concurrency.max(1);
        let mut pending: Vec<NibblePath> = Vec::new();
        push_children(&mut pending, prefix);
        let mut probes: JoinSet<ProbeOutcome> = JoinSet::new();
        let mut queries: u64 = 0;

        loop {
            while probes.len() < limit {
                let Some(path) = pending.pop() else {
                    break;
                };
                self.spawn_probe(&mut probes, path);
                queries += 1;
            }

            let Some(joined) = probes.join_next().await else {
                break;
            };
            let (path, outcome) = match joined {
                Ok(probe) => probe,
                Err(e) => {
                    probes.abort_all();
                    return Err(DomainError::Transport {
                        server: "walker".to_string(),
                        reason: format!("probe task failed: {}", e),
                    });
                }
            };

            let probe = ResponseClassifier::classify(outcome, path.depth());
            debug!(name = %path, result = probe.label(), "Probe classified");

            if config.verbose {
                self.reporter.report(&path, &probe);
            }

            match probe {
                ProbeResult::LeafAnswer(names) => {
                    if names.is_empty() {
                        debug!(name = %path, "Leaf exists without PTR records");
                        continue;
                    }
                    results.insert(path.render()?, names);
                }
                ProbeResult::InteriorAmbiguous => push_children(&mut pending, &path),
                ProbeResult::Nonexistent => {}
                ProbeResult::Timeout => match config.timeout_policy {
                    TimeoutPolicy::Abort => {
                        probes.abort_all();
                        warn!(name = %path, queries, "Probe timed out, aborting walk");
                        return Err(DomainError::WalkTimeout {
                            path: path.to_hex_string(),
                        });
                    }
                    TimeoutPolicy::Skip => {
                        debug!(name = %path, "Probe timed out, pruning branch");
                    }
                },
                ProbeResult::TransportError(e) => {
                    probes.abort_all();
                    warn!(name = %path, error = %e, queries, "Probe failed, aborting walk");
                    return Err(DomainError::ProbeFailed {
                        path: path.to_query_name(),
                        source: Box::new(e),
                    });
                }
            }
        }

        info!(
            leaves = results.len(),
            queries,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Walk complete"
        );

        Ok(results)
    }

    fn spawn_probe(&self, probes: &mut JoinSet<ProbeOutcome>, path: NibblePath) {
        let resolver = Arc::clone(&self.resolver);

        probes.spawn(async move {
            let outcome = resolver.lookup_ptr(&path.to_query_name()).await;
            (path, outcome)
        });
    }
}

/// Children go on in reverse so the lowest nibble is popped first.
fn push_children(pending: &mut Vec<NibblePath>, path: &NibblePath) {
    let start = pending.len();
    pending.extend(path.children());
    pending[start..].reverse();
}
