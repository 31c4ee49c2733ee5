//! Stub registry port.

use super::http::{HttpResponse, Method};

/// Matches canonical requests to canned responses and gates live network access.
///
/// Cassettes register their recorded interactions here; the recording
/// adapter asks it whether a response came from a stub.
pub trait StubRegistry: Send + Sync {
    /// Installs an ordered replay sequence for a canonical request,
    /// replacing any previous one.
    fn register(&self, method: &Method, uri: &str, responses: Vec<HttpResponse>);

    /// Returns `true` if a stub is registered for the canonical request.
    fn is_registered(&self, method: &Method, uri: &str) -> bool;

    /// Removes the stub for the canonical request, if any.
    fn deregister(&self, method: &Method, uri: &str);

    /// Returns the next response to serve for the canonical request.
    fn next_response(&self, method: &Method, uri: &str) -> Option<HttpResponse>;

    /// Whether requests without a stub may reach the live network.
    fn allow_live_network(&self) -> bool;

    /// Sets the live network flag.
    fn set_allow_live_network(&self, allow: bool);
}
