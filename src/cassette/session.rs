//! The per-test record/replay session.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::format::RecordedInteraction;
use super::mode::RecordMode;
use super::storage;
use crate::config::Config;
use crate::error::Result;
use crate::ports::http::{HttpResponse, Method};
use crate::ports::registry::StubRegistry;

/// Options accepted when opening a cassette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CassetteOptions {
    /// Record mode; `None` falls back to the config default.
    pub record: Option<RecordMode>,
}

impl CassetteOptions {
    /// Options with an explicit record mode.
    #[must_use]
    pub fn record(mode: RecordMode) -> Self {
        Self { record: Some(mode) }
    }

    /// Options from a record mode name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VcrError::InvalidRecordMode`] for an unknown name.
    pub fn parse(mode: &str) -> Result<Self> {
        Ok(Self::record(RecordMode::validate(mode)?))
    }
}

/// A named, ordered log of interactions bound to one test.
///
/// Opening a cassette toggles the registry's live network flag and registers
/// previously recorded interactions as stubs. [`Cassette::destroy`] persists
/// anything new and undoes both.
pub struct Cassette {
    name: String,
    record_mode: RecordMode,
    cache_file: Option<PathBuf>,
    baseline: Vec<RecordedInteraction>,
    live: Vec<RecordedInteraction>,
    registry: Arc<dyn StubRegistry>,
    prior_allow_live_network: bool,
}

impl Cassette {
    /// Opens a cassette.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if an existing cassette file cannot be
    /// read or parsed. The registry's live network flag is restored first.
    pub fn new(
        name: impl Into<String>,
        options: CassetteOptions,
        config: &Config,
        registry: Arc<dyn StubRegistry>,
    ) -> Result<Self> {
        let name = name.into();
        let record_mode = options.record.unwrap_or(config.default_record_mode());
        let cache_file = storage::cache_file(config.cache_dir(), &name);

        let prior_allow_live_network = registry.allow_live_network();
        registry.set_allow_live_network(record_mode.allows_live_network());

        let baseline = match load_baseline(record_mode, cache_file.as_deref()) {
            Ok(baseline) => baseline,
            Err(e) => {
                registry.set_allow_live_network(prior_allow_live_network);
                return Err(e);
            }
        };

        info!(
            cassette = %name,
            mode = %record_mode,
            loaded = baseline.len(),
            "opened cassette"
        );

        let cassette = Self {
            name,
            record_mode,
            cache_file,
            live: baseline.clone(),
            baseline,
            registry,
            prior_allow_live_network,
        };
        cassette.register_baseline();
        Ok(cassette)
    }

    /// Identifier the storage path is derived from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective record mode.
    #[must_use]
    pub fn record_mode(&self) -> RecordMode {
        self.record_mode
    }

    /// Where this cassette is persisted, if a cache directory is configured.
    #[must_use]
    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    /// Interactions loaded when the cassette was opened.
    #[must_use]
    pub fn baseline(&self) -> &[RecordedInteraction] {
        &self.baseline
    }

    /// Every interaction known to this session, baseline first.
    #[must_use]
    pub fn recorded_interactions(&self) -> &[RecordedInteraction] {
        &self.live
    }

    /// Interactions observed during this session.
    #[must_use]
    pub fn new_interactions(&self) -> &[RecordedInteraction] {
        &self.live[self.baseline.len()..]
    }

    /// Appends an observed interaction. Repeats are kept: they replay in order.
    pub fn store_recorded_response(&mut self, interaction: RecordedInteraction) {
        debug!(
            cassette = %self.name,
            method = %interaction.method(),
            uri = interaction.uri(),
            "recorded interaction"
        );
        self.live.push(interaction);
    }

    /// Closes the cassette.
    ///
    /// Writes the full interaction list when anything new was recorded and a
    /// cache directory is configured, deregisters the baseline stubs, and
    /// restores the registry's live network flag. The last two steps run
    /// even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the cassette file cannot be written.
    pub fn destroy(self) -> Result<()> {
        let written = self.write_to_disk();
        for interaction in &self.baseline {
            let (method, uri) = interaction.key();
            self.registry.deregister(method, uri);
        }
        self.registry.set_allow_live_network(self.prior_allow_live_network);
        written
    }

    fn write_to_disk(&self) -> Result<()> {
        let Some(path) = &self.cache_file else {
            return Ok(());
        };
        let new = self.new_interactions().len();
        if new == 0 {
            return Ok(());
        }
        storage::save(path, &self.live)?;
        info!(
            cassette = %self.name,
            path = %path.display(),
            new,
            total = self.live.len(),
            "wrote cassette"
        );
        Ok(())
    }

    fn register_baseline(&self) {
        let mut order: Vec<(&Method, &str)> = Vec::new();
        let mut groups: HashMap<(&Method, &str), Vec<HttpResponse>> = HashMap::new();
        for interaction in &self.baseline {
            let key = interaction.key();
            let responses = groups.entry(key).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            responses.push(interaction.response().clone());
        }
        for key in order {
            if let Some(responses) = groups.remove(&key) {
                self.registry.register(key.0, key.1, responses);
            }
        }
    }
}

impl fmt::Debug for Cassette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cassette")
            .field("name", &self.name)
            .field("record_mode", &self.record_mode)
            .field("cache_file", &self.cache_file)
            .field("baseline", &self.baseline.len())
            .field("live", &self.live.len())
            .finish_non_exhaustive()
    }
}

fn load_baseline(mode: RecordMode, cache_file: Option<&Path>) -> Result<Vec<RecordedInteraction>> {
    match cache_file {
        Some(path) if mode.loads_baseline() && path.exists() => storage::load(path),
        _ => Ok(Vec::new()),
    }
}
