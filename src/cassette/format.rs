//! Recorded interaction data structures.

use serde::{Deserialize, Serialize};

use crate::ports::http::{HttpResponse, Method};

/// A single captured HTTP exchange, keyed by its canonical request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedInteraction {
    method: Method,
    uri: String,
    response: HttpResponse,
}

impl RecordedInteraction {
    /// Creates an interaction from a canonical request and its response.
    pub fn new(method: Method, uri: impl Into<String>, response: HttpResponse) -> Self {
        Self { method, uri: uri.into(), response }
    }

    /// Lowercase request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Fully-qualified canonical URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Captured response.
    #[must_use]
    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    /// The `(method, uri)` identity used to group repeated calls.
    #[must_use]
    pub fn key(&self) -> (&Method, &str) {
        (&self.method, &self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_layout_uses_plain_method_token() {
        let interaction = RecordedInteraction::new(
            Method::new("GET"),
            "http://api.test:80/login",
            HttpResponse::new(200, "P"),
        );
        let yaml = serde_yaml::to_string(&vec![interaction.clone()]).expect("serialize");
        assert!(yaml.contains("method: get"));
        assert!(yaml.contains("uri: http://api.test:80/login"));

        let back: Vec<RecordedInteraction> = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(back, vec![interaction]);
    }

    #[test]
    fn response_headers_default_when_absent() {
        let yaml = "- method: post\n  uri: http://h:80/\n  response:\n    status: 201\n";
        let parsed: Vec<RecordedInteraction> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed[0].response(), &HttpResponse::new(201, ""));
        assert_eq!(parsed[0].key(), (&Method::new("post"), "http://h:80/"));
    }

    #[test]
    fn uppercase_method_in_file_matches_canonical_key() {
        let yaml = "- method: GET\n  uri: http://h:80/\n  response:\n    status: 200\n";
        let parsed: Vec<RecordedInteraction> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed[0].key(), (&Method::new("get"), "http://h:80/"));
    }
}
