//! Record modes governing network access and recording.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VcrError};

/// Policy deciding whether a cassette may reach the live network and
/// whether previously recorded interactions are replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordMode {
    /// Always hit the live network and record everything. Prior data is never loaded.
    All,
    /// Never hit the live network; only recorded interactions may answer.
    None,
    /// Replay known requests and send only unknown ones to the live network.
    #[default]
    Unregistered,
}

impl RecordMode {
    /// Every accepted mode, in declaration order.
    pub const VALID: [RecordMode; 3] =
        [RecordMode::All, RecordMode::None, RecordMode::Unregistered];

    /// Parses and validates a record mode name.
    ///
    /// A leading `:` is tolerated so `:none` and `none` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`VcrError::InvalidRecordMode`] for anything other than
    /// `all`, `none`, or `unregistered`.
    pub fn validate(value: &str) -> Result<Self> {
        let name = value.strip_prefix(':').unwrap_or(value);
        Self::VALID
            .into_iter()
            .find(|mode| mode.as_str() == name)
            .ok_or_else(|| VcrError::InvalidRecordMode { value: value.to_string() })
    }

    /// Lowercase name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::None => "none",
            Self::Unregistered => "unregistered",
        }
    }

    /// Whether requests without a stub may reach the live network.
    #[must_use]
    pub fn allows_live_network(self) -> bool {
        matches!(self, Self::All | Self::Unregistered)
    }

    /// Whether a cassette in this mode loads its persisted interactions.
    #[must_use]
    pub fn loads_baseline(self) -> bool {
        self != Self::All
    }
}

impl FromStr for RecordMode {
    type Err = VcrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::validate(s)
    }
}

impl fmt::Display for RecordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
