//! Live adapter for the `HttpClient` port using `reqwest`.

use reqwest::blocking::Client;
use reqwest::Method as ReqwestMethod;

use crate::ports::http::{Endpoint, HttpClient, HttpRequest, HttpResponse, TransportError};

/// Live HTTP client bound to one endpoint.
pub struct LiveHttpClient {
    endpoint: Endpoint,
    client: Client,
}

impl LiveHttpClient {
    /// Creates a live client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, client: Client::new() }
    }

    /// The URL a request target resolves to on this endpoint.
    fn url_for(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            return target.to_string();
        }
        let endpoint = &self.endpoint;
        format!("{}://{}:{}{target}", endpoint.scheme(), endpoint.host, endpoint.port)
    }
}

impl HttpClient for LiveHttpClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = ReqwestMethod::from_bytes(request.method.to_ascii_uppercase().as_bytes())?;
        let mut builder = self.client.request(method, self.url_for(&request.target));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect();
        let body = response.text()?;
        Ok(HttpResponse { status, headers, body })
    }
}
