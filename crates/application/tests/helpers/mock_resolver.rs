#![allow(dead_code)]

use async_trait::async_trait;
use ip6walk_application::ports::{ProbeReporter, PtrResolver};
use ip6walk_domain::{DomainError, NibblePath, ProbeResult, PtrLookup};
use std::collections::HashMap;
use std::net::Ipv6Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// In-memory `ip6.arpa` tree. Unknown names are NXDOMAIN.
pub struct MockPtrResolver {
    responses: RwLock<HashMap<String, Result<PtrLookup, DomainError>>>,
    delays: RwLock<HashMap<String, Duration>>,
    default_delay: RwLock<Option<Duration>>,
    default_response: RwLock<Option<Result<PtrLookup, DomainError>>>,
    queried: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    max_alive_tasks: AtomicUsize,
}

impl MockPtrResolver {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            delays: RwLock::new(HashMap::new()),
            default_delay: RwLock::new(None),
            default_response: RwLock::new(None),
            queried: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            max_alive_tasks: AtomicUsize::new(0),
        }
    }

    pub fn set_response(&self, name: &str, outcome: Result<PtrLookup, DomainError>) {
        self.responses
            .write()
            .unwrap()
            .insert(name.to_string(), outcome);
    }

    pub fn set_path_response(&self, path: &NibblePath, outcome: Result<PtrLookup, DomainError>) {
        self.set_response(&path.to_query_name(), outcome);
    }

    /// Publish PTR names for `address` and make every ancestor an empty
    /// non-terminal (NODATA) unless it already has a response.
    pub fn add_host(&self, address: &str, names: &[&str]) {
        let addr: Ipv6Addr = address.parse().unwrap();
        let leaf = NibblePath::from_address(addr);
        let labels = leaf.labels().to_vec();

        let mut responses = self.responses.write().unwrap();
        for depth in 1..labels.len() {
            let ancestor = NibblePath::from_labels(&labels[labels.len() - depth..]).unwrap();
            responses
                .entry(ancestor.to_query_name())
                .or_insert(Ok(PtrLookup::NoData));
        }
        responses.insert(
            leaf.to_query_name(),
            Ok(PtrLookup::Answer(
                names.iter().map(|n| n.to_string()).collect(),
            )),
        );
    }

    /// Answer for names with no explicit response, instead of NXDOMAIN.
    pub fn set_default_response(&self, outcome: Result<PtrLookup, DomainError>) {
        *self.default_response.write().unwrap() = Some(outcome);
    }

    pub fn set_delay(&self, name: &str, delay: Duration) {
        self.delays.write().unwrap().insert(name.to_string(), delay);
    }

    pub fn set_default_delay(&self, delay: Duration) {
        *self.default_delay.write().unwrap() = Some(delay);
    }

    pub fn queried_names(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queried.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Most runtime tasks seen alive during any lookup.
    pub fn max_alive_tasks(&self) -> usize {
        self.max_alive_tasks.load(Ordering::SeqCst)
    }
}

impl Default for MockPtrResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PtrResolver for MockPtrResolver {
    async fn lookup_ptr(&self, name: &str) -> Result<PtrLookup, DomainError> {
        self.queried.lock().unwrap().push(name.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let alive = tokio::runtime::Handle::current().metrics().num_alive_tasks();
        self.max_alive_tasks.fetch_max(alive, Ordering::SeqCst);

        let delay = self
            .delays
            .read()
            .unwrap()
            .get(name)
            .copied()
            .or(*self.default_delay.read().unwrap());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.responses
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .or_else(|| self.default_response.read().unwrap().clone())
            .unwrap_or(Ok(PtrLookup::NxDomain))
    }
}

/// Collects verbose probe reports as `(hex path, label)` pairs.
#[derive(Default)]
pub struct RecordingProbeReporter {
    reports: Mutex<Vec<(String, &'static str)>>,
}

impl RecordingProbeReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reports(&self) -> Vec<(String, &'static str)> {
        self.reports.lock().unwrap().clone()
    }
}

impl ProbeReporter for RecordingProbeReporter {
    fn report(&self, path: &NibblePath, result: &ProbeResult) {
        self.reports
            .lock()
            .unwrap()
            .push((path.to_hex_string(), result.label()));
    }
}
