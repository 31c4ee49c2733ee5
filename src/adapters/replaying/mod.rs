//! Replaying adapters that answer requests from registered stubs.

pub mod http;
pub mod registry;

pub use http::StubbingHttpClient;
pub use registry::MemoryStubRegistry;
