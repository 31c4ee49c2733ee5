//! Port traits defining external boundaries.
//!
//! The HTTP call path and the stub registry are collaborators the cassette
//! machinery talks to but does not own. Implementations live in `src/adapters/`.

pub mod http;
pub mod registry;

pub use http::{Endpoint, HttpClient, HttpRequest, HttpResponse, Method, TransportError};
pub use registry::StubRegistry;
