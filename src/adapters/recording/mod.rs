//! Recording adapters that capture interactions into cassettes.

pub mod http;

pub use http::RecordingHttpClient;
