//! Recording adapter for the `HttpClient` port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::cassette::current::CurrentCassette;
use crate::cassette::format::RecordedInteraction;
use crate::identity::canonical_request;
use crate::ports::http::{Endpoint, HttpClient, HttpRequest, HttpResponse, TransportError};
use crate::ports::registry::StubRegistry;

/// Records live responses into the current cassette while delegating to an
/// inner implementation.
///
/// The inner client may re-enter this one while a call is in flight. Only the
/// outermost call of such a chain is recorded, and a response is skipped when
/// the registry has a stub for it (it was replayed, not fetched).
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    current: CurrentCassette,
    registry: Arc<dyn StubRegistry>,
    depth: AtomicUsize,
}

impl RecordingHttpClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(
        inner: Box<dyn HttpClient>,
        current: CurrentCassette,
        registry: Arc<dyn StubRegistry>,
    ) -> Self {
        Self { inner, current, registry, depth: AtomicUsize::new(0) }
    }

    fn record(&self, request: &HttpRequest, response: &HttpResponse) {
        if !self.current.is_active() {
            debug!("no active cassette; response not recorded");
            return;
        }
        let canonical = canonical_request(self.inner.endpoint(), request);
        if self.registry.is_registered(&canonical.method, &canonical.uri) {
            debug!(method = %canonical.method, uri = %canonical.uri, "skipping stubbed response");
            return;
        }
        let interaction =
            RecordedInteraction::new(canonical.method, canonical.uri, response.clone());
        let stored =
            self.current.with_current(|cassette| cassette.store_recorded_response(interaction));
        if stored.is_none() {
            debug!("cassette ejected mid-request; response not recorded");
        }
    }
}

/// Holds one level of call depth and releases it on drop.
struct DepthGuard<'a> {
    depth: &'a AtomicUsize,
    level: usize,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a AtomicUsize) -> Self {
        let level = depth.fetch_add(1, Ordering::SeqCst) + 1;
        Self { depth, level }
    }

    fn is_outermost(&self) -> bool {
        self.level == 1
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HttpClient for RecordingHttpClient {
    fn endpoint(&self) -> &Endpoint {
        self.inner.endpoint()
    }

    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let guard = DepthGuard::enter(&self.depth);
        let response = self.inner.perform(request)?;
        if guard.is_outermost() {
            self.record(request, &response);
        }
        Ok(response)
    }
}
