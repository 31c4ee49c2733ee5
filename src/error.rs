//! Error types for netvcr.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for netvcr operations.
pub type Result<T> = std::result::Result<T, VcrError>;

/// Errors raised by cassettes, configuration, and the stubbing layer.
#[derive(Debug, Error)]
pub enum VcrError {
    /// A record mode string did not name a known mode.
    #[error(
        "{value} is not a valid cassette record mode. Valid options are: [all, none, unregistered]"
    )]
    InvalidRecordMode {
        /// The rejected value.
        value: String,
    },

    /// The configured cache directory could not be created.
    #[error("Failed to create cache directory {}: {source}", .path.display())]
    CacheDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A `.env` file exists but could not be read or parsed.
    #[error("Failed to load .env file: {source}")]
    EnvFile {
        /// Underlying dotenv error.
        #[source]
        source: dotenvy::Error,
    },

    /// Loading or writing a cassette file failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A request had no stub and live network access is disabled.
    #[error("Real HTTP connections are disabled. Unregistered request: {method} {uri}")]
    NetConnectNotAllowed {
        /// Lowercase request method.
        method: String,
        /// Canonical request URI.
        uri: String,
    },
}

/// Failures reading or writing cassette files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The cassette file exists but could not be read.
    #[error("Failed to read cassette file {}: {source}", .path.display())]
    Read {
        /// Cassette file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The cassette file is not a valid interaction list.
    #[error("Failed to parse cassette file {}: {source}", .path.display())]
    Decode {
        /// Cassette file path.
        path: PathBuf,
        /// Codec error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The interactions could not be serialized.
    #[error("Failed to serialize cassette {}: {source}", .path.display())]
    Encode {
        /// Cassette file path.
        path: PathBuf,
        /// Codec error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The cassette file or its parent directory could not be written.
    #[error("Failed to write cassette file {}: {source}", .path.display())]
    Write {
        /// Cassette file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_mode_lists_valid_options() {
        let err = VcrError::InvalidRecordMode { value: "sometimes".into() };
        let msg = err.to_string();
        assert!(msg.starts_with("sometimes is not a valid cassette record mode"));
        assert!(msg.contains("unregistered"));
    }

    #[test]
    fn persistence_errors_convert_transparently() {
        let err: VcrError = PersistenceError::Write {
            path: PathBuf::from("/c/x.yml"),
            source: io::Error::other("disk full"),
        }
        .into();
        assert_eq!(err.to_string(), "Failed to write cassette file /c/x.yml: disk full");
    }
}
