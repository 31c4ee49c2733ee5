//! HTTP client port: the call path wrapped by the recording and stubbing adapters.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error type returned by [`HttpClient::perform`]. Transport errors pass
/// through the adapters unchanged.
pub type TransportError = Box<dyn Error + Send + Sync>;

/// Lowercase HTTP verb used as a matching and storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Method(String);

impl Method {
    /// Normalizes a verb into its lowercase token form.
    #[must_use]
    pub fn new(verb: &str) -> Self {
        Self(verb.trim().to_ascii_lowercase())
    }

    /// The lowercase token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Method {
    fn from(verb: &str) -> Self {
        Self::new(verb)
    }
}

impl From<String> for Method {
    fn from(verb: String) -> Self {
        Self::new(&verb)
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.0
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The host a connection talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Whether the connection uses TLS.
    pub use_tls: bool,
}

impl Endpoint {
    /// A plain-text endpoint.
    pub fn http(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, use_tls: false }
    }

    /// A TLS endpoint.
    pub fn https(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, use_tls: true }
    }

    /// `http` or `https`.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.use_tls {
            "https"
        } else {
            "http"
        }
    }
}

/// An outbound request as handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb as given by the caller (any case).
    pub method: String,
    /// Request-line target: a path such as `/users?id=1` or an absolute URL.
    pub target: String,
    /// Request headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers or body.
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self { method: method.into(), target: target.into(), headers: Vec::new(), body: None }
    }

    /// A `GET` request.
    pub fn get(target: impl Into<String>) -> Self {
        Self::new("GET", target)
    }

    /// A `POST` request.
    pub fn post(target: impl Into<String>) -> Self {
        Self::new("POST", target)
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds an `Authorization: Basic` header for the given credentials.
    #[must_use]
    pub fn with_basic_auth(self, user: &str, password: &str) -> Self {
        use base64::Engine;
        let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
        self.with_header("Authorization", format!("Basic {token}"))
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the first header with the given name, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A captured response. This is the payload stored in cassettes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response headers in the order received.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Response body decoded as text.
    #[serde(default)]
    pub body: String,
}

impl HttpResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, headers: Vec::new(), body: body.into() }
    }
}

/// Performs HTTP requests against a single endpoint (one connection).
///
/// Adapters wrap one another through this trait, so call sites never know
/// whether a request was recorded, stubbed, or sent live.
pub trait HttpClient: Send + Sync {
    /// The endpoint this client is connected to.
    fn endpoint(&self) -> &Endpoint;

    /// Sends a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the request is refused.
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    fn endpoint(&self) -> &Endpoint {
        (**self).endpoint()
    }

    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).perform(request)
    }
}
