//! In-memory stub registry serving recorded responses in order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::ports::http::{HttpResponse, Method};
use crate::ports::registry::StubRegistry;

/// Key for indexing stubs by canonical method and URI.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct StubKey {
    method: Method,
    uri: String,
}

impl StubKey {
    fn new(method: &Method, uri: &str) -> Self {
        Self { method: method.clone(), uri: uri.to_string() }
    }
}

/// Ordered responses for one key plus the position of the next one to serve.
#[derive(Debug)]
struct StubQueue {
    responses: Vec<HttpResponse>,
    cursor: usize,
}

/// Registry keeping stubs in memory.
///
/// Repeated calls to the same request walk its responses front to back; once
/// the queue is exhausted the last response keeps being served.
#[derive(Debug)]
pub struct MemoryStubRegistry {
    stubs: Mutex<HashMap<StubKey, StubQueue>>,
    allow_live_network: AtomicBool,
}

impl MemoryStubRegistry {
    /// An empty registry that allows live network access.
    #[must_use]
    pub fn new() -> Self {
        Self { stubs: Mutex::new(HashMap::new()), allow_live_network: AtomicBool::new(true) }
    }

    /// Number of registered requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no stubs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StubKey, StubQueue>> {
        self.stubs.lock().expect("stub registry lock poisoned")
    }
}

impl Default for MemoryStubRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StubRegistry for MemoryStubRegistry {
    fn register(&self, method: &Method, uri: &str, responses: Vec<HttpResponse>) {
        if responses.is_empty() {
            return;
        }
        self.lock().insert(StubKey::new(method, uri), StubQueue { responses, cursor: 0 });
    }

    fn is_registered(&self, method: &Method, uri: &str) -> bool {
        self.lock().contains_key(&StubKey::new(method, uri))
    }

    fn deregister(&self, method: &Method, uri: &str) {
        self.lock().remove(&StubKey::new(method, uri));
    }

    fn next_response(&self, method: &Method, uri: &str) -> Option<HttpResponse> {
        let mut stubs = self.lock();
        let queue = stubs.get_mut(&StubKey::new(method, uri))?;
        let index = queue.cursor.min(queue.responses.len() - 1);
        queue.cursor = queue.cursor.saturating_add(1);
        Some(queue.responses[index].clone())
    }

    fn allow_live_network(&self) -> bool {
        self.allow_live_network.load(Ordering::SeqCst)
    }

    fn set_allow_live_network(&self, allow: bool) {
        self.allow_live_network.store(allow, Ordering::SeqCst);
    }
}
