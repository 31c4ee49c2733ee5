//! Canonical request identity.
//!
//! The same logical request can reach the client as a bare path or as an
//! absolute URL, with or without credentials. Stubs and recordings are keyed
//! on one normalized form: `scheme://[user:pass@]host:port/path`.

use base64::Engine;
use reqwest::Url;
use tracing::warn;

use crate::ports::http::{Endpoint, HttpRequest, Method};

/// Characters allowed literally in a userinfo component besides ASCII alphanumerics.
const USERINFO_SAFE: &str = "-_.!~*'();&=+$,";

/// Normalized `(method, uri)` pair used as the matching and storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRequest {
    /// Lowercase method token.
    pub method: Method,
    /// Fully-qualified URI including host and port.
    pub uri: String,
}

/// Builds the canonical identity of `request` sent over `endpoint`.
#[must_use]
pub fn canonical_request(endpoint: &Endpoint, request: &HttpRequest) -> CanonicalRequest {
    let userinfo = request
        .header("authorization")
        .and_then(basic_userinfo)
        .map(|userinfo| format!("{userinfo}@"))
        .unwrap_or_default();
    let uri = format!(
        "{}://{userinfo}{}:{}{}",
        endpoint.scheme(),
        endpoint.host,
        endpoint.port,
        request_path(&request.target)
    );
    CanonicalRequest { method: Method::new(&request.method), uri }
}

/// Path and query of the request line. Absolute targets are parsed so only
/// their request URI remains.
fn request_path(target: &str) -> String {
    if !target.starts_with("http") {
        return target.to_string();
    }
    match Url::parse(target) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        },
        Err(_) => target.to_string(),
    }
}

/// Decodes `Basic` credentials into an encoded `user:pass` userinfo string.
///
/// Credentials are handled as raw bytes. Trailing empty fields are dropped,
/// so `alice:` becomes `alice`.
fn basic_userinfo(header: &str) -> Option<String> {
    let token = header.strip_prefix("Basic ")?;
    let decoded = match base64::engine::general_purpose::STANDARD.decode(token.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "ignoring malformed Basic authorization header");
            return None;
        }
    };
    let mut parts: Vec<&[u8]> = decoded.split(|&b| b == b':').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    Some(parts.into_iter().map(encode_userinfo_part).collect::<Vec<_>>().join(":"))
}

fn encode_userinfo_part(part: &[u8]) -> String {
    let mut encoded = String::with_capacity(part.len());
    for &byte in part {
        if byte.is_ascii_alphanumeric() || USERINFO_SAFE.as_bytes().contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&urlencoding::encode_binary(&[byte]));
        }
    }
    encoded
}
