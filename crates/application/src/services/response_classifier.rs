use ip6walk_domain::{DomainError, ProbeResult, PtrLookup, MAX_DEPTH};

/// Turns a raw PTR outcome into a walk directive.
///
/// Below leaf depth neither an answer nor NODATA tells us whether children
/// exist (empty non-terminals look exactly like hidden decoys), so both
/// mean "recurse". Only NXDOMAIN prunes.
pub struct ResponseClassifier;

impl ResponseClassifier {
    pub fn classify(outcome: Result<PtrLookup, DomainError>, depth: usize) -> ProbeResult {
        let at_leaf = depth >= MAX_DEPTH;
        match outcome {
            Ok(PtrLookup::Answer(names)) if at_leaf => ProbeResult::LeafAnswer(names),
            Ok(PtrLookup::NoData) if at_leaf => ProbeResult::LeafAnswer(Vec::new()),
            Ok(PtrLookup::Answer(_)) | Ok(PtrLookup::NoData) => ProbeResult::InteriorAmbiguous,
            Ok(PtrLookup::NxDomain) => ProbeResult::Nonexistent,
            Err(e) if e.is_timeout() => ProbeResult::Timeout,
            Err(e) => ProbeResult::TransportError(e),
        }
    }
}
