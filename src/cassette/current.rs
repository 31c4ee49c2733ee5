//! Handle to the cassette that is currently recording.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::session::Cassette;

/// Shared slot holding at most one active cassette.
///
/// The harness owns the slot and inserts or takes cassettes; interceptors
/// hold a clone and only reach the active cassette through
/// [`CurrentCassette::with_current`].
#[derive(Debug, Clone, Default)]
pub struct CurrentCassette {
    slot: Arc<Mutex<Option<Cassette>>>,
}

impl CurrentCassette {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `cassette` the active one, returning the cassette it replaced.
    pub fn insert(&self, cassette: Cassette) -> Option<Cassette> {
        self.lock().replace(cassette)
    }

    /// Removes and returns the active cassette.
    pub fn take(&self) -> Option<Cassette> {
        self.lock().take()
    }

    /// Whether a cassette is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    /// Runs `f` against the active cassette; returns `None` when there is none.
    pub fn with_current<R>(&self, f: impl FnOnce(&mut Cassette) -> R) -> Option<R> {
        self.lock().as_mut().map(f)
    }

    /// A callback that panicked (a failed assertion, usually) leaves the slot
    /// usable for later requests.
    fn lock(&self) -> MutexGuard<'_, Option<Cassette>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
