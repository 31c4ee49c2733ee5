//! Replaying adapter for the `HttpClient` port.

use std::sync::Arc;

use tracing::debug;

use crate::error::VcrError;
use crate::identity::canonical_request;
use crate::ports::http::{Endpoint, HttpClient, HttpRequest, HttpResponse, TransportError};
use crate::ports::registry::StubRegistry;

/// Serves registered stubs and gates everything else on the registry's
/// live network flag.
pub struct StubbingHttpClient {
    inner: Box<dyn HttpClient>,
    registry: Arc<dyn StubRegistry>,
}

impl StubbingHttpClient {
    /// Creates a stubbing client in front of the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, registry: Arc<dyn StubRegistry>) -> Self {
        Self { inner, registry }
    }
}

impl HttpClient for StubbingHttpClient {
    fn endpoint(&self) -> &Endpoint {
        self.inner.endpoint()
    }

    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let canonical = canonical_request(self.inner.endpoint(), request);
        if let Some(response) = self.registry.next_response(&canonical.method, &canonical.uri) {
            debug!(method = %canonical.method, uri = %canonical.uri, "served stub");
            return Ok(response);
        }
        if !self.registry.allow_live_network() {
            return Err(Box::new(VcrError::NetConnectNotAllowed {
                method: canonical.method.to_string(),
                uri: canonical.uri,
            }));
        }
        self.inner.perform(request)
    }
}
