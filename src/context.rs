//! Harness-facing context bundling config, registry, and the current cassette.

use std::sync::Arc;

use tracing::warn;

use crate::adapters::recording::RecordingHttpClient;
use crate::adapters::replaying::{MemoryStubRegistry, StubbingHttpClient};
use crate::cassette::current::CurrentCassette;
use crate::cassette::format::RecordedInteraction;
use crate::cassette::session::{Cassette, CassetteOptions};
use crate::config::Config;
use crate::error::Result;
use crate::ports::http::HttpClient;
use crate::ports::registry::StubRegistry;

/// Everything a test harness needs to record and replay HTTP traffic.
///
/// The harness owns one context, opens a cassette per test with
/// [`VcrContext::insert_cassette`], and hands clients built by
/// [`VcrContext::client`] to the code under test.
pub struct VcrContext {
    config: Config,
    registry: Arc<dyn StubRegistry>,
    current: CurrentCassette,
}

impl VcrContext {
    /// Creates a context backed by an in-memory stub registry.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, Arc::new(MemoryStubRegistry::new()))
    }

    /// Creates a context backed by the given registry.
    #[must_use]
    pub fn with_registry(config: Config, registry: Arc<dyn StubRegistry>) -> Self {
        Self { config, registry, current: CurrentCassette::new() }
    }

    /// Settings used for new cassettes.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable settings; changes apply to cassettes opened afterwards.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The shared stub registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn StubRegistry> {
        &self.registry
    }

    /// Handle to the active cassette.
    #[must_use]
    pub fn current(&self) -> &CurrentCassette {
        &self.current
    }

    /// Wraps a transport so its calls are stubbed and recorded.
    #[must_use]
    pub fn client(&self, inner: Box<dyn HttpClient>) -> RecordingHttpClient {
        let stubbing = StubbingHttpClient::new(inner, Arc::clone(&self.registry));
        RecordingHttpClient::new(
            Box::new(stubbing),
            self.current.clone(),
            Arc::clone(&self.registry),
        )
    }

    /// Opens a cassette and makes it the active one. An already active
    /// cassette is destroyed first.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous cassette cannot be persisted or the
    /// new one cannot be loaded.
    pub fn insert_cassette(&self, name: &str, options: CassetteOptions) -> Result<()> {
        if let Some(previous) = self.current.take() {
            warn!(cassette = previous.name(), "replacing a cassette that was never ejected");
            previous.destroy()?;
        }
        let cassette = Cassette::new(name, options, &self.config, Arc::clone(&self.registry))?;
        self.current.insert(cassette);
        Ok(())
    }

    /// Destroys the active cassette, returning the interactions it recorded
    /// during the session, or `None` when no cassette was active.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the cassette file cannot be written.
    pub fn eject_cassette(&self) -> Result<Option<Vec<RecordedInteraction>>> {
        let Some(cassette) = self.current.take() else {
            return Ok(None);
        };
        let recorded = cassette.new_interactions().to_vec();
        cassette.destroy()?;
        Ok(Some(recorded))
    }

    /// Runs `f` with a cassette inserted, ejecting it afterwards even when
    /// `f` fails. The first error wins.
    ///
    /// # Errors
    ///
    /// Returns the error from inserting, from `f`, or from ejecting.
    pub fn use_cassette<T, F>(&self, name: &str, options: CassetteOptions, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.insert_cassette(name, options)?;
        let result = f();
        let ejected = self.eject_cassette();
        let value = result?;
        ejected?;
        Ok(value)
    }
}
